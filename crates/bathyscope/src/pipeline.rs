//! One load pipeline, parameterized by dataset kind.
//!
//! `prepare` is pure: it turns text into a ready dataset without touching the
//! scene. The coordinator decides whether the result is committed.
//! `fetch_and_prepare` adds the read, so a caller can hold a ticket and await
//! its text without borrowing the coordinator.

use bathyscope_core::{
    BathyscopeError, DatasetKind, Options, RecordParser, RejectedLine, Result, Vec3,
};
use bathyscope_render::Heatmap;
use bathyscope_structures::{PointCloud, Track, TriangleMesh};

use crate::source::TextSource;

/// Identifies one load of one dataset kind.
///
/// Sequence numbers increase per kind; only the newest ticket may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    pub kind: DatasetKind,
    pub seq: u64,
}

/// A built dataset waiting to be committed.
pub enum PreparedDataset {
    Triangles(TriangleMesh),
    Track(Track),
    Points(PointCloud),
}

impl PreparedDataset {
    /// The kind of dataset held.
    #[must_use]
    pub fn kind(&self) -> DatasetKind {
        match self {
            PreparedDataset::Triangles(_) => DatasetKind::Triangles,
            PreparedDataset::Track(_) => DatasetKind::Track,
            PreparedDataset::Points(_) => DatasetKind::Points,
        }
    }
}

/// Summary of one load, returned to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub kind: DatasetKind,
    /// Where the text came from.
    pub source: String,
    /// Records that made it into the dataset.
    pub accepted: usize,
    /// Lines that were dropped, with reasons.
    pub rejected: Vec<RejectedLine>,
    /// Centering shift, for triangle datasets.
    pub shift: Option<Vec3>,
}

impl LoadReport {
    /// Number of dropped lines.
    #[must_use]
    pub fn num_rejected(&self) -> usize {
        self.rejected.len()
    }
}

/// Output of [`prepare`].
pub struct PreparedLoad {
    pub ticket: LoadTicket,
    pub dataset: PreparedDataset,
    pub report: LoadReport,
}

/// Parses and builds a dataset of `ticket.kind` from `text`.
///
/// Triangle meshes are centered; tracks and points keep raw coordinates and
/// are placed at commit time. Heatmap colors are computed last, over the
/// final positions.
pub fn prepare(
    ticket: LoadTicket,
    source: &str,
    text: &str,
    options: &Options,
) -> Result<PreparedLoad> {
    let kind = ticket.kind;
    if text.trim().is_empty() {
        return Err(BathyscopeError::EmptySource(source.to_string()));
    }

    let parsed = RecordParser::new(options.delimiter)
        .with_policy(options.parse_policy)
        .with_min_fields(kind.min_fields())
        .parse(text);

    if parsed.num_rejected() > 0 {
        log::warn!(
            "{kind} source '{source}': skipped {} malformed line(s)",
            parsed.num_rejected()
        );
    }

    if parsed.records.is_empty() {
        return Err(BathyscopeError::EmptyDataset {
            kind,
            rejected: parsed.num_rejected(),
        });
    }

    let name = kind.name();
    let magnification = options.depth_magnification;
    let heatmap = Heatmap::from_options(&options.heatmap);
    let mut shift = None;

    let dataset = match kind {
        DatasetKind::Triangles => {
            let mut mesh = TriangleMesh::from_records(name, &parsed.records, magnification);
            shift = mesh.center();
            mesh.apply_heatmap(&heatmap);
            PreparedDataset::Triangles(mesh)
        }
        DatasetKind::Track => {
            let mut track = Track::from_records(name, &parsed.records, magnification);
            track.apply_heatmap(&heatmap);
            PreparedDataset::Track(track)
        }
        DatasetKind::Points => {
            let mut cloud = PointCloud::from_records(name, &parsed.records, magnification);
            cloud.apply_heatmap(&heatmap);
            PreparedDataset::Points(cloud)
        }
    };

    if let Some(shift) = shift {
        log::debug!("{kind} centered by {shift}");
    }

    Ok(PreparedLoad {
        ticket,
        dataset,
        report: LoadReport {
            kind,
            source: source.to_string(),
            accepted: parsed.num_records(),
            rejected: parsed.rejected,
            shift,
        },
    })
}

/// Reads `source` and runs [`prepare`] on its text.
///
/// Read failures surface as errors; nothing is committed here.
pub async fn fetch_and_prepare(
    ticket: LoadTicket,
    source: &impl TextSource,
    options: &Options,
) -> Result<PreparedLoad> {
    let name = source.describe();
    let text = source.read_text().await?;
    prepare(ticket, &name, &text, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bathyscope_core::{Marker, ParsePolicy, RejectReason};

    fn ticket(kind: DatasetKind) -> LoadTicket {
        LoadTicket { kind, seq: 1 }
    }

    #[test]
    fn test_single_triangle() {
        let text = "id,x1,y1,z1,x2,y2,z2,x3,y3,z3\n1,0,0,0,1,0,0,0,1,0\n";
        let load = prepare(ticket(DatasetKind::Triangles), "tri", text, &Options::default()).unwrap();

        let PreparedDataset::Triangles(mesh) = load.dataset else {
            panic!("expected a triangle mesh");
        };
        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(load.report.shift, Some(Vec3::new(0.5, 0.5, 0.0)));
        assert_eq!(mesh.vertices()[1], Vec3::new(0.5, -0.5, 0.0));

        let colors = mesh.colors().unwrap();
        assert_eq!(colors.len(), 3);
        assert!(colors.iter().all(|c| c.is_finite() && *c == colors[0]));
    }

    #[test]
    fn test_points_magnify_and_mark() {
        let text = "x,y,z,debugFlag\n0,0,0,1\n0,0,10,-1\n";
        let load = prepare(ticket(DatasetKind::Points), "pts", text, &Options::default()).unwrap();

        let PreparedDataset::Points(cloud) = load.dataset else {
            panic!("expected a point cloud");
        };
        assert_eq!(cloud.points()[0].z, 0.0);
        assert_eq!(cloud.points()[1].z, 100.0);
        assert_eq!(cloud.markers(), &[Marker::Normal, Marker::Debug]);
        assert_eq!(load.report.shift, None);
    }

    #[test]
    fn test_malformed_rows_are_counted() {
        let text = "fishId,x,y,z,flag\n1,0,0,0,0\n1,abc,0,0,0\n1,1,1\n1,2,2,2,0\n";
        let load = prepare(ticket(DatasetKind::Track), "track", text, &Options::default()).unwrap();

        assert_eq!(load.report.accepted, 2);
        assert_eq!(load.report.num_rejected(), 2);
        assert!(matches!(
            load.report.rejected[1].reason,
            RejectReason::TooFewFields { expected: 5, actual: 3 }
        ));
        let PreparedDataset::Track(track) = load.dataset else {
            panic!("expected a track");
        };
        assert_eq!(track.num_edges(), 1);
    }

    #[test]
    fn test_lenient_policy_keeps_rows() {
        let options = Options {
            parse_policy: ParsePolicy::Lenient,
            ..Options::default()
        };
        let text = "x,y,z,flag\n1,oops,1,0\n2,2,2,0\n";
        let load = prepare(ticket(DatasetKind::Points), "pts", text, &options).unwrap();
        assert_eq!(load.report.accepted, 2);
        assert_eq!(load.report.num_rejected(), 0);
    }

    #[test]
    fn test_empty_text_is_an_error() {
        let err = prepare(ticket(DatasetKind::Track), "track", "  \n", &Options::default())
            .err()
            .unwrap();
        assert!(matches!(err, BathyscopeError::EmptySource(_)));
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        let err = prepare(ticket(DatasetKind::Triangles), "tri", "id,x1\n", &Options::default())
            .err()
            .unwrap();
        assert!(matches!(
            err,
            BathyscopeError::EmptyDataset {
                kind: DatasetKind::Triangles,
                rejected: 0
            }
        ));
    }

    #[test]
    fn test_configured_delimiter() {
        let options = Options {
            delimiter: ';',
            ..Options::default()
        };
        let text = "x;y;z;flag\n1;2;3;0\n";
        let load = prepare(ticket(DatasetKind::Points), "pts", text, &options).unwrap();
        assert_eq!(load.report.accepted, 1);
    }
}
