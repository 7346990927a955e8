//! Common dataset and chunk fixtures.

use vino_common::{AxisDescriptor, DatasetInfo, Format, VinoId};

/// One axis descriptor with a `[0, 1]` range.
pub fn axis(order: usize, name: &str, label: &str) -> AxisDescriptor {
    AxisDescriptor {
        order,
        name: name.to_string(),
        axis: Some(label.to_string()),
        desc: None,
        unit: None,
        range: Some((0.0, 1.0)),
    }
}

/// A dataset of the given dimensionality with generated axis names.
pub fn dataset_info(id: u32, dim: usize, format: Format) -> DatasetInfo {
    let labels = ["x", "y", "z"];
    let axes: Vec<AxisDescriptor> = (0..dim)
        .map(|i| axis(i, &format!("v{}", i), labels.get(i).copied().unwrap_or("")))
        .collect();

    DatasetInfo {
        id: VinoId(id),
        dim,
        format,
        vp: Some(1),
        title: Some(format!("dataset {}", id)),
        size: Some(100),
        axes: axes.clone(),
        variables: axes,
        grid: None,
        original: None,
    }
}

/// 2-D bar-grid dataset.
pub fn dataset_info_2d(id: u32) -> DatasetInfo {
    dataset_info(id, 2, Format::Bars)
}

/// 5-D kd-tree dataset, only visualizable through sections.
pub fn dataset_info_5d(id: u32) -> DatasetInfo {
    dataset_info(id, 5, Format::KdTree)
}

/// JSON for a 2-D values chunk.
pub fn points_chunk_json() -> &'static str {
    r#"{"values": [[1.0, 2.0], [3.0, 4.0]], "dim": 2, "format": "bars"}"#
}

/// JSON for an outline-shapes chunk with one gap separator.
pub fn shapes_chunk_json() -> &'static str {
    r#"{"shapes": [[0.0, 1.0, null, 2.0], [0.0, 1.0, null, 2.0]], "dim": 2}"#
}
