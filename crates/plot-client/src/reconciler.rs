//! Form-state reconciliation.
//!
//! On every relevant UI change the reconciler reads the form controls,
//! derives the canonical requested state, applies form policy side effects
//! (defaults, availability of section/shapes modes), and decides whether a
//! re-plot is warranted: only a state that is both valid and different from
//! the last committed one triggers fetches.

use tracing::{debug, info};

use vino_common::{
    DatasetInfo, Format, Plane, Ppa, RequestedState, VinoError, VinoId, VinoResult,
};
use vino_protocol::{data_url, UrlSuffix};

use crate::cache::DatasetInfoCache;
use crate::source::DataSource;

/// The form-control seam. Reads are synchronous snapshots of the live
/// controls; writes adjust defaults, availability, and validity flags.
pub trait FormControls {
    fn dataset_id(&self) -> Option<VinoId>;
    fn format(&self) -> Option<Format>;
    fn ppa_text(&self) -> String;
    fn section(&self) -> bool;
    fn distance(&self) -> bool;
    fn shapes(&self) -> bool;
    fn plane(&self) -> Plane;
    /// Current value of each per-axis slice control, in off-plane axis
    /// order. Empty when no section controls exist.
    fn slice_positions(&self) -> Vec<f64>;

    fn set_format(&mut self, format: Option<Format>);
    fn set_ppa(&mut self, ppa: &Ppa);
    fn set_section(&mut self, on: bool);
    /// A locked section toggle cannot be turned off by the user.
    fn set_section_locked(&mut self, locked: bool);
    fn set_section_available(&mut self, available: bool);
    fn set_shapes_available(&mut self, available: bool);
    fn set_format_locked(&mut self, locked: bool);
    /// Recreate one numeric slice control per off-plane axis, each bounded
    /// `0..=max`.
    fn rebuild_slice_controls(&mut self, bounds: &[(usize, u32)]);
    /// Set or clear the invalid-input indicator on the ppa field.
    fn set_ppa_invalid(&mut self, invalid: bool);
}

/// Default sampling density for a format at a given dimensionality.
pub fn default_ppa(format: Format, dim: usize) -> Ppa {
    let value = match (format, dim) {
        (Format::RegularGrid, 2) => 300,
        (Format::RegularGrid, _) => 30,
        (_, 2) => 1000,
        (_, _) => 50,
    };
    Ppa::Scalar(value)
}

/// A reconciled request ready to run: the committed state and the URLs a
/// plot session should fetch, overlay first.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotPlan {
    pub state: RequestedState,
    pub urls: Vec<String>,
}

impl PlotPlan {
    /// Compose the fetch list for a committed state.
    ///
    /// The shapes overlay goes first so its trace renders under the data
    /// trace; the base data URL carries the section suffix when section mode
    /// is active. The two suffixes never combine on one URL.
    pub fn build(state: &RequestedState, info: &DatasetInfo) -> Self {
        let mut urls = Vec::with_capacity(2);

        let effective_format = state.format.unwrap_or(info.format);
        if state.shapes && !state.section && info.dim == 2 && effective_format.has_shapes() {
            urls.push(data_url(state, &UrlSuffix::Shapes));
        }

        let suffix = if state.section {
            UrlSuffix::Section {
                plane: state.plane,
                at: state.at.clone().unwrap_or_default(),
            }
        } else {
            UrlSuffix::None
        };
        urls.push(data_url(state, &suffix));

        Self {
            state: state.clone(),
            urls,
        }
    }
}

/// Decides, synchronously per UI change, whether a re-plot is warranted.
pub struct Reconciler<C> {
    controls: C,
    cache: DatasetInfoCache,
    committed: Option<RequestedState>,
}

impl<C: FormControls> Reconciler<C> {
    pub fn new(controls: C, cache: DatasetInfoCache) -> Self {
        Self {
            controls,
            cache,
            committed: None,
        }
    }

    pub fn controls(&self) -> &C {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut C {
        &mut self.controls
    }

    /// Last committed state, the dirty-check baseline.
    pub fn committed(&self) -> Option<&RequestedState> {
        self.committed.as_ref()
    }

    /// Read every relevant control into a canonical state. No side effects.
    pub fn requested_state(&self) -> VinoResult<RequestedState> {
        let id = self.controls.dataset_id().ok_or(VinoError::NoDataset)?;
        let ppa: Ppa = self.controls.ppa_text().parse()?;
        let section = self.controls.section();

        Ok(RequestedState {
            id,
            format: self.controls.format(),
            ppa,
            section,
            plane: self.controls.plane(),
            at: section.then(|| self.controls.slice_positions()),
            distance: self.controls.distance(),
            shapes: self.controls.shapes(),
        })
    }

    /// Check the state against the dataset, flagging the ppa field.
    ///
    /// Native format needs no density, so it is always valid; otherwise the
    /// ppa must supply exactly one positive value per dataset dimension.
    pub fn is_valid(&mut self, state: &RequestedState, info: &DatasetInfo) -> bool {
        let valid = state.format.is_none() || state.ppa.validate(info.dim).is_ok();
        self.controls.set_ppa_invalid(!valid);
        valid
    }

    /// True when the state differs structurally from the last commit.
    pub fn is_dirty(&self, state: &RequestedState) -> bool {
        self.committed.as_ref() != Some(state)
    }

    /// Replace the committed state. Called exactly once per accepted
    /// reconciliation, before any fetch is issued, so a rapid second change
    /// during an in-flight fetch is judged against the new commit.
    pub fn commit(&mut self, state: RequestedState) {
        self.committed = Some(state);
    }

    /// Side-effecting form adjustments, applied before the dirty check
    /// because they can themselves dirty the state.
    pub fn apply_form_policy(&mut self, info: &DatasetInfo) {
        let dataset_switched = self.committed.as_ref().map(|s| s.id) != Some(info.id);
        if dataset_switched {
            self.controls.set_format(Some(Format::Bars));
            self.controls.set_ppa(&default_ppa(Format::Bars, info.dim));
        }

        // Format change resets the density to the format's default.
        let current_format = self.controls.format();
        let committed_format = self.committed.as_ref().and_then(|s| s.format);
        if !dataset_switched && current_format != committed_format {
            if let Some(format) = current_format {
                self.controls.set_ppa(&default_ppa(format, info.dim));
            }
        }

        // Section availability is forced by dimensionality: above 3-D only
        // sections are visualizable, at or below 2-D none are.
        if info.dim > 3 {
            self.controls.set_section_available(true);
            self.controls.set_section(true);
            self.controls.set_section_locked(true);
        } else if info.dim <= 2 {
            self.controls.set_section(false);
            self.controls.set_section_available(false);
            self.controls.set_section_locked(false);
        } else {
            self.controls.set_section_available(true);
            self.controls.set_section_locked(false);
        }

        let section_active = self.controls.section();
        self.controls
            .set_format_locked(section_active || self.controls.distance());

        let effective_format = current_format.unwrap_or(info.format);
        self.controls
            .set_shapes_available(info.dim == 2 && effective_format.has_shapes());

        if section_active {
            self.refresh_slice_controls(info);
        }
    }

    /// Regenerate the per-axis slice controls when the plane or density
    /// changed since the last commit, one control per off-plane axis bounded
    /// `[0, ppa(axis) - 1]`.
    fn refresh_slice_controls(&mut self, info: &DatasetInfo) {
        let plane = self.controls.plane();
        let ppa = match self.controls.ppa_text().parse::<Ppa>() {
            Ok(ppa) => ppa,
            Err(_) => return,
        };

        let unchanged = self.committed.as_ref().is_some_and(|c| {
            c.section && c.plane == plane && c.ppa == ppa && c.id == info.id
        });
        if unchanged {
            return;
        }

        let bounds: Vec<(usize, u32)> = plane
            .off_axes(info.dim)
            .into_iter()
            .map(|axis| (axis, ppa.axis(axis).saturating_sub(1)))
            .collect();
        self.controls.rebuild_slice_controls(&bounds);
    }

    /// Full reconciliation pass: resolve the dataset info (cache first),
    /// apply form policy, and return a plan iff the fresh state is valid and
    /// dirty. Commits before returning, never after.
    pub async fn reconcile<S: DataSource>(
        &mut self,
        source: &S,
    ) -> VinoResult<Option<PlotPlan>> {
        let id = match self.controls.dataset_id() {
            Some(id) => id,
            None => return Ok(None),
        };

        let info = match self.cache.get(id) {
            Some(info) => info,
            None => {
                let fetched = source.fetch_info(id).await?;
                self.cache.put(fetched)
            }
        };

        self.apply_form_policy(&info);

        let state = match self.requested_state() {
            Ok(state) => state,
            Err(VinoError::InvalidPpa(text)) => {
                debug!(ppa = %text, "unparseable ppa, no plot");
                self.controls.set_ppa_invalid(true);
                return Ok(None);
            }
            Err(other) => return Err(other),
        };

        if !self.is_valid(&state, &info) || !self.is_dirty(&state) {
            return Ok(None);
        }

        self.commit(state.clone());
        let plan = PlotPlan::build(&state, &info);
        info!(id = %state.id, urls = plan.urls.len(), "plot requested");
        Ok(Some(plan))
    }
}
