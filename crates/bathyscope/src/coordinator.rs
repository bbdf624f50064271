//! Owns the loaded datasets and sequences loads into them.

use std::path::Path;

use bathyscope_core::{
    Alignment, BathyscopeError, BoundingBox, DatasetKind, Options, Result, Structure,
};
use bathyscope_render::{Camera, Framing};
use bathyscope_structures::{DisplayMode, PointCloud, Track, TriangleMesh};

use crate::pipeline::{
    fetch_and_prepare, prepare, LoadReport, LoadTicket, PreparedDataset, PreparedLoad,
};
use crate::source::{FileSource, InlineSource, TextSource};

/// What happened to a prepared load at commit time.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The dataset replaced the previous one of its kind.
    Applied(LoadReport),
    /// A newer load of the same kind was issued; the dataset was dropped.
    Stale { ticket: LoadTicket, newest: u64 },
}

impl LoadOutcome {
    /// Returns true if the dataset was committed.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, LoadOutcome::Applied(_))
    }

    /// The load report, if the dataset was committed.
    #[must_use]
    pub fn report(&self) -> Option<&LoadReport> {
        match self {
            LoadOutcome::Applied(report) => Some(report),
            LoadOutcome::Stale { .. } => None,
        }
    }
}

/// The scene: one slot per dataset kind, a shared alignment, and a camera.
pub struct Coordinator {
    options: Options,
    mesh: Option<TriangleMesh>,
    track: Option<Track>,
    points: Option<PointCloud>,
    alignment: Alignment,
    issued: [u64; 3],
    display_mode: DisplayMode,
    camera: Camera,
    framing: Option<Framing>,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Coordinator {
    /// Creates an empty scene.
    pub fn new(options: Options) -> Self {
        let camera = Camera::from_options(&options.camera);
        Self {
            options,
            mesh: None,
            track: None,
            points: None,
            alignment: Alignment::new(),
            issued: [0; 3],
            display_mode: DisplayMode::default(),
            camera,
            framing: None,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The loaded triangle mesh.
    pub fn mesh(&self) -> Option<&TriangleMesh> {
        self.mesh.as_ref()
    }

    /// The loaded track.
    pub fn track(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    /// The loaded point cloud.
    pub fn points(&self) -> Option<&PointCloud> {
        self.points.as_ref()
    }

    /// The dataset in a slot, as a structure.
    pub fn structure(&self, kind: DatasetKind) -> Option<&dyn Structure> {
        match kind {
            DatasetKind::Triangles => self.mesh.as_ref().map(|s| s as &dyn Structure),
            DatasetKind::Track => self.track.as_ref().map(|s| s as &dyn Structure),
            DatasetKind::Points => self.points.as_ref().map(|s| s as &dyn Structure),
        }
    }

    /// Returns true if a dataset of `kind` is loaded.
    pub fn is_loaded(&self, kind: DatasetKind) -> bool {
        self.structure(kind).is_some()
    }

    /// The shared frame all datasets are placed in.
    pub fn alignment(&self) -> &Alignment {
        &self.alignment
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// The most recent auto-framing, if any load has framed the camera.
    pub fn framing(&self) -> Option<Framing> {
        self.framing
    }

    /// World-space bounds of every loaded, enabled dataset.
    pub fn scene_bounds(&self) -> Option<BoundingBox> {
        DatasetKind::ALL
            .iter()
            .filter_map(|&kind| self.structure(kind))
            .filter(|s| s.is_enabled())
            .filter_map(|s| s.bounding_box())
            .reduce(|a, b| a.union(&b))
    }

    /// Current triangle display mode. Persists across mesh reloads.
    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    /// Switches the mesh between outline and heatmap display.
    ///
    /// Fails with [`BathyscopeError::NotLoaded`] when no mesh is loaded; the
    /// mode is left unchanged in that case.
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Result<()> {
        let mesh = self
            .mesh
            .as_mut()
            .ok_or(BathyscopeError::NotLoaded(DatasetKind::Triangles))?;
        mesh.set_display_mode(mode);
        self.display_mode = mode;
        log::debug!("display mode set to {mode:?}");
        Ok(())
    }

    /// Locks the camera to a top-down view of the current target.
    pub fn lock_top_down(&mut self) {
        self.camera.lock_top_down();
    }

    /// Restores the camera saved by [`Coordinator::lock_top_down`].
    pub fn unlock_top_down(&mut self) {
        self.camera.unlock_top_down();
    }

    /// Issues a ticket for a new load of `kind`, superseding older ones.
    pub fn begin_load(&mut self, kind: DatasetKind) -> LoadTicket {
        let seq = &mut self.issued[kind.index()];
        *seq += 1;
        LoadTicket { kind, seq: *seq }
    }

    /// Returns true if `ticket` is the newest issued for its kind.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.issued[ticket.kind.index()] == ticket.seq
    }

    /// Runs the pipeline for `ticket` over already-fetched text.
    pub fn prepare(&self, ticket: LoadTicket, source: &str, text: &str) -> Result<PreparedLoad> {
        prepare(ticket, source, text, &self.options)
    }

    /// Installs a prepared dataset, unless a newer load of its kind exists.
    pub fn commit(&mut self, load: PreparedLoad) -> LoadOutcome {
        let PreparedLoad {
            ticket,
            dataset,
            report,
        } = load;

        if !self.is_current(ticket) {
            let newest = self.issued[ticket.kind.index()];
            log::warn!(
                "discarding stale {} load #{} (newest is #{newest})",
                ticket.kind,
                ticket.seq
            );
            return LoadOutcome::Stale { ticket, newest };
        }

        let bounds = match dataset {
            PreparedDataset::Triangles(mut mesh) => {
                mesh.set_display_mode(self.display_mode);
                self.alignment.set_shift(mesh.shift());
                log::debug!("alignment shift is now {}", self.alignment.shift());
                self.realign_overlays();
                let bounds = mesh.bounding_box();
                self.mesh = Some(mesh);
                bounds
            }
            PreparedDataset::Track(mut track) => {
                track.set_transform(self.alignment.placement());
                let bounds = self.overlay_framing_bounds(&track);
                self.track = Some(track);
                bounds
            }
            PreparedDataset::Points(mut cloud) => {
                cloud.set_transform(self.alignment.placement());
                let bounds = self.overlay_framing_bounds(&cloud);
                self.points = Some(cloud);
                bounds
            }
        };

        if let Some(bb) = bounds {
            let framing = self.camera.frame_box(&bb);
            log::debug!(
                "framed radius {} at distance {} (near {}, far {})",
                framing.sphere.radius,
                framing.distance,
                framing.near,
                framing.far
            );
            self.framing = Some(framing);
        }

        log::info!(
            "loaded {} from '{}': {} record(s), {} rejected",
            report.kind,
            report.source,
            report.accepted,
            report.num_rejected()
        );
        LoadOutcome::Applied(report)
    }

    /// Loads `kind` from `source`.
    ///
    /// On any error the previous dataset of that kind stays in place. This
    /// holds the scene for the whole read; to run reads concurrently, take a
    /// ticket with [`Coordinator::begin_load`], await
    /// [`fetch_and_prepare`](crate::fetch_and_prepare) on a copy of the
    /// options, then [`Coordinator::commit`].
    pub async fn load(
        &mut self,
        kind: DatasetKind,
        source: &impl TextSource,
    ) -> Result<LoadOutcome> {
        let ticket = self.begin_load(kind);
        let prepared = fetch_and_prepare(ticket, source, &self.options).await?;
        Ok(self.commit(prepared))
    }

    /// Loads `kind` from user-supplied text.
    pub async fn load_text(
        &mut self,
        kind: DatasetKind,
        label: &str,
        text: &str,
    ) -> Result<LoadOutcome> {
        self.load(kind, &InlineSource::new(label, text)).await
    }

    /// Loads every kind from its default path under `base_dir`.
    ///
    /// Failures are logged and leave the slot as it was; the per-kind results
    /// are returned in load order.
    pub async fn load_defaults(
        &mut self,
        base_dir: impl AsRef<Path>,
    ) -> Vec<(DatasetKind, Result<LoadOutcome>)> {
        let mut results = Vec::with_capacity(DatasetKind::ALL.len());
        for kind in DatasetKind::ALL {
            let source = FileSource::in_dir(base_dir.as_ref(), self.options.sources.path(kind));
            let result = self.load(kind, &source).await;
            if let Err(e) = &result {
                log::warn!("startup load of {kind} failed: {e}");
            }
            results.push((kind, result));
        }
        results
    }

    fn realign_overlays(&mut self) {
        let placement = self.alignment.placement();
        if let Some(track) = self.track.as_mut() {
            track.set_transform(placement);
        }
        if let Some(cloud) = self.points.as_mut() {
            cloud.set_transform(placement);
        }
    }

    fn overlay_framing_bounds(&self, overlay: &dyn Structure) -> Option<BoundingBox> {
        if self.mesh.is_none() && self.options.frame_overlays_without_mesh {
            overlay.bounding_box()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bathyscope_core::Vec3;
    use pollster::FutureExt;

    const TRIANGLE: &str = "id,x1,y1,z1,x2,y2,z2,x3,y3,z3\n1,0,0,0,1,0,0,0,1,0\n";
    const TRACK: &str = "fishId,x,y,z,flag\n7,1,1,0,0\n7,2,1,0,-1\n";

    #[test]
    fn test_tickets_increase_per_kind() {
        let mut scene = Coordinator::default();
        let a = scene.begin_load(DatasetKind::Track);
        let b = scene.begin_load(DatasetKind::Track);
        let c = scene.begin_load(DatasetKind::Points);
        assert_eq!((a.seq, b.seq, c.seq), (1, 2, 1));
        assert!(!scene.is_current(a));
        assert!(scene.is_current(b));
        assert!(scene.is_current(c));
    }

    #[test]
    fn test_stale_commit_is_discarded() {
        let mut scene = Coordinator::default();
        let old = scene.begin_load(DatasetKind::Track);
        let new = scene.begin_load(DatasetKind::Track);

        let newer = scene.prepare(new, "new", TRACK).unwrap();
        assert!(scene.commit(newer).is_applied());

        let older = scene.prepare(old, "old", "id,x,y,z,f\n1,5,5,5,0\n").unwrap();
        let outcome = scene.commit(older);
        assert_eq!(
            outcome,
            LoadOutcome::Stale {
                ticket: old,
                newest: 2
            }
        );
        assert_eq!(scene.track().unwrap().num_nodes(), 2);
    }

    #[test]
    fn test_reload_keeps_top_down_lock() {
        let mut scene = Coordinator::default();
        scene
            .load_text(DatasetKind::Triangles, "tri", TRIANGLE)
            .block_on()
            .unwrap();
        let pose = Vec3::new(7.0, 8.0, 9.0);
        scene.camera_mut().position = pose;
        scene.lock_top_down();

        scene
            .load_text(DatasetKind::Triangles, "tri", TRIANGLE)
            .block_on()
            .unwrap();
        assert!(scene.camera().is_top_down_locked());

        scene.unlock_top_down();
        assert_eq!(scene.camera().position, pose);
    }

    #[test]
    fn test_display_mode_without_mesh() {
        let mut scene = Coordinator::default();
        let err = scene.set_display_mode(DisplayMode::Heatmap).unwrap_err();
        assert!(matches!(err, BathyscopeError::NotLoaded(DatasetKind::Triangles)));
        assert_eq!(scene.display_mode(), DisplayMode::Outline);
    }

    #[test]
    fn test_display_mode_survives_reload() {
        let mut scene = Coordinator::default();
        scene
            .load_text(DatasetKind::Triangles, "tri", TRIANGLE)
            .block_on()
            .unwrap();
        scene.set_display_mode(DisplayMode::Heatmap).unwrap();
        assert!(scene.mesh().unwrap().heatmap_visible());

        scene
            .load_text(DatasetKind::Triangles, "tri", TRIANGLE)
            .block_on()
            .unwrap();
        let mesh = scene.mesh().unwrap();
        assert_eq!(mesh.display_mode(), DisplayMode::Heatmap);
        assert!(mesh.heatmap_visible());
        assert!(!mesh.outline_visible());
    }

    #[test]
    fn test_mesh_commit_realigns_loaded_track() {
        let mut scene = Coordinator::default();
        scene
            .load_text(DatasetKind::Track, "track", TRACK)
            .block_on()
            .unwrap();
        assert_eq!(scene.track().unwrap().world_positions()[0], Vec3::new(1.0, 1.0, 0.0));

        scene
            .load_text(DatasetKind::Triangles, "tri", TRIANGLE)
            .block_on()
            .unwrap();
        assert_eq!(scene.alignment().shift(), Vec3::new(0.5, 0.5, 0.0));
        assert_eq!(scene.track().unwrap().world_positions()[0], Vec3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn test_overlay_frames_only_without_mesh() {
        let mut scene = Coordinator::default();
        scene
            .load_text(DatasetKind::Track, "track", TRACK)
            .block_on()
            .unwrap();
        let first = scene.framing().unwrap();
        assert_eq!(first.sphere.center, Vec3::new(1.5, 1.0, 0.0));

        scene
            .load_text(DatasetKind::Triangles, "tri", TRIANGLE)
            .block_on()
            .unwrap();
        let mesh_framing = scene.framing().unwrap();
        assert_eq!(mesh_framing.sphere.center, Vec3::ZERO);

        scene
            .load_text(DatasetKind::Points, "pts", "x,y,z,f\n50,50,50,0\n")
            .block_on()
            .unwrap();
        assert_eq!(scene.framing(), Some(mesh_framing));
    }

    #[test]
    fn test_failed_load_keeps_previous_dataset() {
        let mut scene = Coordinator::default();
        scene
            .load_text(DatasetKind::Track, "track", TRACK)
            .block_on()
            .unwrap();

        let err = scene
            .load_text(DatasetKind::Track, "bad", "fishId,x,y,z,flag\na,b,c,d,e\n")
            .block_on()
            .unwrap_err();
        assert!(matches!(err, BathyscopeError::EmptyDataset { rejected: 1, .. }));
        assert_eq!(scene.track().unwrap().num_nodes(), 2);
    }

    #[test]
    fn test_scene_bounds_skip_hidden() {
        let mut scene = Coordinator::default();
        assert!(scene.scene_bounds().is_none());
        scene
            .load_text(DatasetKind::Points, "pts", "x,y,z,f\n1,2,3,0\n")
            .block_on()
            .unwrap();
        let bb = scene.scene_bounds().unwrap();
        assert_eq!(bb.min, Vec3::new(1.0, 2.0, 30.0));
    }
}
