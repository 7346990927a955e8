//! Tests for form-state reconciliation: dirty/valid gating, defaults on
//! dataset switch, section policy, and plan composition.

use plot_client::cache::DatasetInfoCache;
use plot_client::reconciler::{FormControls, PlotPlan, Reconciler};
use vino_common::{Format, Plane, Ppa, RequestedState, VinoId};
use test_utils::{dataset_info, dataset_info_2d, dataset_info_5d, MockDataSource, MockForm};

fn reconciler(form: MockForm) -> Reconciler<MockForm> {
    Reconciler::new(form, DatasetInfoCache::new())
}

#[tokio::test]
async fn test_2d_dataset_switch_resets_defaults() {
    let source = MockDataSource::new().with_info(dataset_info_2d(1));
    let mut rec = reconciler(MockForm::selecting(1));

    let plan = rec.reconcile(&source).await.unwrap().unwrap();

    assert_eq!(rec.controls().format, Some(Format::Bars));
    assert_eq!(rec.controls().ppa, "1000");
    assert_eq!(plan.state.ppa, Ppa::Scalar(1000));
    assert_eq!(plan.urls, vec!["/api/vino/1/bargrid/1000/".to_string()]);
}

#[tokio::test]
async fn test_5d_dataset_forces_section_on() {
    let source = MockDataSource::new().with_info(dataset_info_5d(2));
    let mut rec = reconciler(MockForm::selecting(2));

    let plan = rec.reconcile(&source).await.unwrap().unwrap();

    assert_eq!(rec.controls().ppa, "50");
    assert!(rec.controls().section);
    assert!(rec.controls().section_locked);
    assert!(rec.controls().format_locked);
    assert!(plan.state.section);
    // One slice control per off-plane axis of the default (0,1) plane.
    assert_eq!(rec.controls().slice_bounds, vec![(2, 49), (3, 49), (4, 49)]);
    assert_eq!(
        plan.urls,
        vec!["/api/vino/2/bargrid/50/section/0,1/0,0,0/".to_string()]
    );
}

#[tokio::test]
async fn test_2d_dataset_disables_section() {
    let source = MockDataSource::new().with_info(dataset_info_2d(1));
    let mut form = MockForm::selecting(1);
    form.section = true;
    let mut rec = reconciler(form);

    rec.reconcile(&source).await.unwrap().unwrap();

    assert!(!rec.controls().section);
    assert!(!rec.controls().section_available);
}

#[tokio::test]
async fn test_clean_state_does_not_replot() {
    let source = MockDataSource::new().with_info(dataset_info_2d(1));
    let mut rec = reconciler(MockForm::selecting(1));

    assert!(rec.reconcile(&source).await.unwrap().is_some());
    // Nothing changed since the commit.
    assert!(rec.reconcile(&source).await.unwrap().is_none());
}

#[tokio::test]
async fn test_field_change_makes_state_dirty_again() {
    let source = MockDataSource::new().with_info(dataset_info_2d(1));
    let mut rec = reconciler(MockForm::selecting(1));
    rec.reconcile(&source).await.unwrap().unwrap();

    rec.controls_mut().ppa = "500".to_string();
    let plan = rec.reconcile(&source).await.unwrap().unwrap();
    assert_eq!(plan.state.ppa, Ppa::Scalar(500));
    assert_eq!(plan.urls, vec!["/api/vino/1/bargrid/500/".to_string()]);
}

#[tokio::test]
async fn test_info_fetched_once_per_dataset() {
    let source = MockDataSource::new().with_info(dataset_info_2d(1));
    let mut rec = reconciler(MockForm::selecting(1));

    rec.reconcile(&source).await.unwrap();
    rec.controls_mut().ppa = "700".to_string();
    rec.reconcile(&source).await.unwrap();

    assert_eq!(source.info_calls(), vec![VinoId(1)]);
}

#[tokio::test]
async fn test_bad_ppa_marks_field_invalid_and_skips_plot() {
    let source = MockDataSource::new().with_info(dataset_info_2d(1));
    let mut rec = reconciler(MockForm::selecting(1));
    rec.reconcile(&source).await.unwrap().unwrap();

    rec.controls_mut().ppa = "bogus".to_string();
    assert!(rec.reconcile(&source).await.unwrap().is_none());
    assert!(rec.controls().ppa_invalid);

    // Fixing the field clears the flag and plots again.
    rec.controls_mut().ppa = "800".to_string();
    assert!(rec.reconcile(&source).await.unwrap().is_some());
    assert!(!rec.controls().ppa_invalid);
}

#[tokio::test]
async fn test_ppa_cardinality_mismatch_is_invalid() {
    let source = MockDataSource::new().with_info(dataset_info(3, 3, Format::Bars));
    let mut rec = reconciler(MockForm::selecting(3));
    rec.reconcile(&source).await.unwrap().unwrap();

    rec.controls_mut().ppa = "10,20".to_string();
    assert!(rec.reconcile(&source).await.unwrap().is_none());
    assert!(rec.controls().ppa_invalid);

    rec.controls_mut().ppa = "10,20,30".to_string();
    let plan = rec.reconcile(&source).await.unwrap().unwrap();
    assert_eq!(plan.state.ppa, Ppa::PerAxis(vec![10, 20, 30]));
}

#[tokio::test]
async fn test_shapes_overlay_url_enqueued_first() {
    let source = MockDataSource::new().with_info(dataset_info_2d(9));
    let mut form = MockForm::selecting(9);
    form.shapes = true;
    let mut rec = reconciler(form);

    let plan = rec.reconcile(&source).await.unwrap().unwrap();

    assert!(rec.controls().shapes_available);
    assert_eq!(
        plan.urls,
        vec![
            "/api/vino/9/bargrid/1000/shapes/".to_string(),
            "/api/vino/9/bargrid/1000/".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_no_shapes_overlay_for_regulargrid() {
    let source = MockDataSource::new().with_info(dataset_info_2d(9));
    let mut form = MockForm::selecting(9);
    form.shapes = true;
    let mut rec = reconciler(form);
    rec.reconcile(&source).await.unwrap().unwrap();

    rec.controls_mut().format = Some(Format::RegularGrid);
    let plan = rec.reconcile(&source).await.unwrap().unwrap();

    assert!(!rec.controls().shapes_available);
    // Format switch also resets the density to the regulargrid default.
    assert_eq!(plan.urls, vec!["/api/vino/9/regulargrid/300/".to_string()]);
}

#[tokio::test]
async fn test_distance_mode_url() {
    let source = MockDataSource::new().with_info(dataset_info_2d(7));
    let mut rec = reconciler(MockForm::selecting(7));
    rec.reconcile(&source).await.unwrap().unwrap();

    rec.controls_mut().format = Some(Format::RegularGrid);
    rec.controls_mut().distance = true;
    let mut plan = rec.reconcile(&source).await.unwrap().unwrap();
    assert_eq!(
        plan.urls.pop().unwrap(),
        "/api/vino/7/regulargrid[distance]/300/"
    );
    assert!(rec.controls().format_locked);
}

#[tokio::test]
async fn test_plane_change_regenerates_slice_controls() {
    let source = MockDataSource::new().with_info(dataset_info_5d(2));
    let mut rec = reconciler(MockForm::selecting(2));
    rec.reconcile(&source).await.unwrap().unwrap();
    assert_eq!(rec.controls().slice_rebuilds, 1);

    rec.controls_mut().plane = Plane(1, 3);
    rec.reconcile(&source).await.unwrap().unwrap();
    assert_eq!(rec.controls().slice_rebuilds, 2);
    assert_eq!(rec.controls().slice_bounds, vec![(0, 49), (2, 49), (4, 49)]);

    // Same plane and density again: controls stay as they are.
    rec.reconcile(&source).await.unwrap();
    assert_eq!(rec.controls().slice_rebuilds, 2);
}

#[tokio::test]
async fn test_no_dataset_selected_is_a_no_op() {
    let source = MockDataSource::new();
    let mut rec = reconciler(MockForm::default());
    assert!(rec.reconcile(&source).await.unwrap().is_none());
    assert!(source.info_calls().is_empty());
}

#[test]
fn test_plan_section_coordinates_come_from_slice_controls() {
    let info = dataset_info(5, 4, Format::Bars);
    let state = RequestedState {
        id: VinoId(5),
        format: Some(Format::Bars),
        ppa: Ppa::Scalar(10),
        section: true,
        plane: Plane(0, 1),
        at: Some(vec![2.0, 3.0]),
        distance: false,
        shapes: false,
    };

    let plan = PlotPlan::build(&state, &info);
    assert_eq!(
        plan.urls,
        vec!["/api/vino/5/bargrid/10/section/0,1/2,3/".to_string()]
    );
}
