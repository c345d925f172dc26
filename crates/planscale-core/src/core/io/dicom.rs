use crate::core::io::traits::PlanFile;
use crate::core::models::plan::{ControlPoint, IonBeam, IonPlan, ReferencedBeam};
use crate::core::utils::decimal::format_decimal_string;
use dicom_core::value::DataSetSequence;
use dicom_core::{DataElement, PrimitiveValue, Tag, VR};
use dicom_object::{DefaultDicomObject, InMemDicomObject, open_file};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Maximum length of a Short String (SH) value such as RTPlanLabel.
pub const MAX_SHORT_STRING_LEN: usize = 16;

/// Attribute tags of the RT Ion Plan IOD touched by rescaling.
pub mod tags {
    use dicom_core::Tag;

    pub const RT_PLAN_LABEL: Tag = Tag(0x300A, 0x0002);
    pub const RT_PLAN_DATE: Tag = Tag(0x300A, 0x0006);
    pub const RT_PLAN_TIME: Tag = Tag(0x300A, 0x0007);
    pub const FRACTION_GROUP_SEQUENCE: Tag = Tag(0x300A, 0x0070);
    pub const BEAM_DOSE: Tag = Tag(0x300A, 0x0084);
    pub const BEAM_METERSET: Tag = Tag(0x300A, 0x0086);
    pub const FINAL_CUMULATIVE_METERSET_WEIGHT: Tag = Tag(0x300A, 0x010E);
    pub const NUMBER_OF_CONTROL_POINTS: Tag = Tag(0x300A, 0x0110);
    pub const CUMULATIVE_METERSET_WEIGHT: Tag = Tag(0x300A, 0x0134);
    pub const SCAN_SPOT_METERSET_WEIGHTS: Tag = Tag(0x300A, 0x0396);
    pub const ION_BEAM_SEQUENCE: Tag = Tag(0x300A, 0x03A2);
    pub const ION_CONTROL_POINT_SEQUENCE: Tag = Tag(0x300A, 0x03A8);
    pub const REFERENCED_BEAM_SEQUENCE: Tag = Tag(0x300C, 0x0004);
}

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum PlanIoError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to read DICOM file '{path}': {source}", path = path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: BoxedError,
    },
    #[error("Failed to write DICOM file '{path}': {source}", path = path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: BoxedError,
    },
    #[error("Missing required attribute: {0}")]
    MissingAttribute(&'static str),
    #[error("Invalid value for attribute {attribute}: {reason}")]
    InvalidAttribute {
        attribute: &'static str,
        reason: String,
    },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
}

/// The parsed DICOM object a plan was read from.
///
/// Every attribute not modelled by [`IonPlan`] is written back verbatim.
#[derive(Debug, Clone)]
pub struct DicomMetadata {
    pub object: DefaultDicomObject,
}

pub struct DicomPlanFile;

impl PlanFile for DicomPlanFile {
    type Metadata = DicomMetadata;
    type Error = PlanIoError;

    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<(IonPlan, Self::Metadata), Self::Error> {
        let path = path.as_ref();
        let object = open_file(path).map_err(|e| PlanIoError::Read {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        let plan = read_plan(&object)?;
        Ok((plan, DicomMetadata { object }))
    }

    fn write_to_path<P: AsRef<Path>>(
        plan: &IonPlan,
        metadata: &Self::Metadata,
        path: P,
    ) -> Result<(), Self::Error> {
        let path = path.as_ref();
        let mut object = metadata.object.clone();
        write_plan(&mut object, plan)?;

        // Write next to the target and rename, so a failed write never
        // leaves a truncated plan at `path`.
        let tmp_path = staging_path(path)?;
        if let Err(e) = object.write_to_file(&tmp_path) {
            discard_staging_file(&tmp_path);
            return Err(PlanIoError::Write {
                path: path.to_path_buf(),
                source: e.into(),
            });
        }
        if let Err(e) = fs::rename(&tmp_path, path) {
            discard_staging_file(&tmp_path);
            return Err(PlanIoError::Write {
                path: path.to_path_buf(),
                source: e.into(),
            });
        }
        Ok(())
    }
}

fn staging_path(path: &Path) -> Result<PathBuf, PlanIoError> {
    let file_name = path.file_name().ok_or_else(|| PlanIoError::Write {
        path: path.to_path_buf(),
        source: "output path has no file name".into(),
    })?;
    let mut staging_name = std::ffi::OsString::from(".");
    staging_name.push(file_name);
    staging_name.push(".tmp");
    Ok(path.with_file_name(staging_name))
}

fn discard_staging_file(tmp_path: &Path) {
    if let Err(e) = fs::remove_file(tmp_path) {
        if e.kind() != io::ErrorKind::NotFound {
            warn!("Failed to remove staging file {:?}: {}", tmp_path, e);
        }
    }
}

/// Extracts the rescaling-relevant attributes from a plan data set.
pub fn read_plan(dataset: &InMemDicomObject) -> Result<IonPlan, PlanIoError> {
    let label = optional_string(dataset, tags::RT_PLAN_LABEL);
    let date = optional_string(dataset, tags::RT_PLAN_DATE);
    let time = optional_string(dataset, tags::RT_PLAN_TIME);

    let fraction_group = first_item(dataset, tags::FRACTION_GROUP_SEQUENCE, "FractionGroupSequence")?;
    let referenced_beam_item = first_item(
        fraction_group,
        tags::REFERENCED_BEAM_SEQUENCE,
        "ReferencedBeamSequence",
    )?;
    let referenced_beam = ReferencedBeam {
        beam_dose: float_attribute(referenced_beam_item, tags::BEAM_DOSE, "BeamDose")?,
        beam_meterset: float_attribute(referenced_beam_item, tags::BEAM_METERSET, "BeamMeterset")?,
    };

    let beam_item = first_item(dataset, tags::ION_BEAM_SEQUENCE, "IonBeamSequence")?;
    let final_cumulative_meterset_weight = float_attribute(
        beam_item,
        tags::FINAL_CUMULATIVE_METERSET_WEIGHT,
        "FinalCumulativeMetersetWeight",
    )?;
    let number_of_control_points = beam_item
        .element(tags::NUMBER_OF_CONTROL_POINTS)
        .map_err(|_| PlanIoError::MissingAttribute("NumberOfControlPoints"))?
        .to_int::<i32>()
        .map_err(|e| PlanIoError::InvalidAttribute {
            attribute: "NumberOfControlPoints",
            reason: e.to_string(),
        })?;
    let number_of_control_points =
        usize::try_from(number_of_control_points).map_err(|_| PlanIoError::InvalidAttribute {
            attribute: "NumberOfControlPoints",
            reason: format!("negative count {}", number_of_control_points),
        })?;

    let control_points = sequence_items(
        beam_item,
        tags::ION_CONTROL_POINT_SEQUENCE,
        "IonControlPointSequence",
    )?
    .iter()
    .map(read_control_point)
    .collect::<Result<Vec<_>, _>>()?;

    Ok(IonPlan {
        label,
        date,
        time,
        referenced_beam,
        beam: IonBeam {
            final_cumulative_meterset_weight,
            number_of_control_points,
            control_points,
        },
    })
}

/// Writes the plan's fields into a data set previously read with [`read_plan`].
///
/// The control point sequence of the data set must have as many items as the
/// plan has control points.
pub fn write_plan(dataset: &mut InMemDicomObject, plan: &IonPlan) -> Result<(), PlanIoError> {
    let label_len = plan.label.chars().count();
    if label_len > MAX_SHORT_STRING_LEN {
        return Err(PlanIoError::InvalidAttribute {
            attribute: "RTPlanLabel",
            reason: format!(
                "{} characters exceed the limit of {}",
                label_len, MAX_SHORT_STRING_LEN
            ),
        });
    }
    put_string(dataset, tags::RT_PLAN_LABEL, VR::SH, &plan.label);
    // An absent date or time is left absent rather than written empty.
    if !plan.date.is_empty() {
        put_string(dataset, tags::RT_PLAN_DATE, VR::DA, &plan.date);
    }
    if !plan.time.is_empty() {
        put_string(dataset, tags::RT_PLAN_TIME, VR::TM, &plan.time);
    }

    let mut fraction_groups =
        sequence_items(dataset, tags::FRACTION_GROUP_SEQUENCE, "FractionGroupSequence")?.to_vec();
    {
        let fraction_group = &mut fraction_groups[0];
        let mut referenced_beams = sequence_items(
            fraction_group,
            tags::REFERENCED_BEAM_SEQUENCE,
            "ReferencedBeamSequence",
        )?
        .to_vec();
        put_decimal(&mut referenced_beams[0], tags::BEAM_DOSE, plan.referenced_beam.beam_dose);
        put_decimal(
            &mut referenced_beams[0],
            tags::BEAM_METERSET,
            plan.referenced_beam.beam_meterset,
        );
        put_sequence(fraction_group, tags::REFERENCED_BEAM_SEQUENCE, referenced_beams);
    }
    put_sequence(dataset, tags::FRACTION_GROUP_SEQUENCE, fraction_groups);

    let mut beams = sequence_items(dataset, tags::ION_BEAM_SEQUENCE, "IonBeamSequence")?.to_vec();
    {
        let beam = &mut beams[0];
        put_decimal(
            beam,
            tags::FINAL_CUMULATIVE_METERSET_WEIGHT,
            plan.beam.final_cumulative_meterset_weight,
        );

        let mut control_points = sequence_items(
            beam,
            tags::ION_CONTROL_POINT_SEQUENCE,
            "IonControlPointSequence",
        )?
        .to_vec();
        if control_points.len() != plan.beam.control_points.len() {
            return Err(PlanIoError::Inconsistency(format!(
                "record has {} control points but the plan has {}",
                control_points.len(),
                plan.beam.control_points.len()
            )));
        }
        for (item, control_point) in control_points.iter_mut().zip(&plan.beam.control_points) {
            write_control_point(item, control_point);
        }
        put_sequence(beam, tags::ION_CONTROL_POINT_SEQUENCE, control_points);
    }
    put_sequence(dataset, tags::ION_BEAM_SEQUENCE, beams);

    Ok(())
}

fn read_control_point(item: &InMemDicomObject) -> Result<ControlPoint, PlanIoError> {
    let cumulative_meterset_weight = float_attribute(
        item,
        tags::CUMULATIVE_METERSET_WEIGHT,
        "CumulativeMetersetWeight",
    )?;
    let scan_spot_meterset_weights = match item.element(tags::SCAN_SPOT_METERSET_WEIGHTS) {
        Ok(element) => element
            .to_multi_float64()
            .map_err(|e| PlanIoError::InvalidAttribute {
                attribute: "ScanSpotMetersetWeights",
                reason: e.to_string(),
            })?,
        Err(_) => Vec::new(),
    };
    Ok(ControlPoint {
        cumulative_meterset_weight,
        scan_spot_meterset_weights,
    })
}

fn write_control_point(item: &mut InMemDicomObject, control_point: &ControlPoint) {
    put_decimal(
        item,
        tags::CUMULATIVE_METERSET_WEIGHT,
        control_point.cumulative_meterset_weight,
    );
    // Control points without a spot map stay without one.
    if item.element(tags::SCAN_SPOT_METERSET_WEIGHTS).is_ok()
        || !control_point.scan_spot_meterset_weights.is_empty()
    {
        let weights = control_point
            .scan_spot_meterset_weights
            .iter()
            .map(|&w| w as f32)
            .collect();
        item.put(DataElement::new(
            tags::SCAN_SPOT_METERSET_WEIGHTS,
            VR::FL,
            PrimitiveValue::F32(weights),
        ));
    }
}

fn sequence_items<'a>(
    dataset: &'a InMemDicomObject,
    tag: Tag,
    name: &'static str,
) -> Result<&'a [InMemDicomObject], PlanIoError> {
    let items = dataset
        .element(tag)
        .map_err(|_| PlanIoError::MissingAttribute(name))?
        .items()
        .ok_or(PlanIoError::InvalidAttribute {
            attribute: name,
            reason: "not a sequence".to_string(),
        })?;
    if items.is_empty() {
        return Err(PlanIoError::InvalidAttribute {
            attribute: name,
            reason: "sequence is empty".to_string(),
        });
    }
    Ok(items)
}

fn first_item<'a>(
    dataset: &'a InMemDicomObject,
    tag: Tag,
    name: &'static str,
) -> Result<&'a InMemDicomObject, PlanIoError> {
    Ok(&sequence_items(dataset, tag, name)?[0])
}

fn float_attribute(
    dataset: &InMemDicomObject,
    tag: Tag,
    name: &'static str,
) -> Result<f64, PlanIoError> {
    dataset
        .element(tag)
        .map_err(|_| PlanIoError::MissingAttribute(name))?
        .to_float64()
        .map_err(|e| PlanIoError::InvalidAttribute {
            attribute: name,
            reason: e.to_string(),
        })
}

fn optional_string(dataset: &InMemDicomObject, tag: Tag) -> String {
    dataset
        .element(tag)
        .ok()
        .and_then(|element| element.to_str().ok())
        .map(|value| value.trim_end_matches(['\0', ' ']).to_string())
        .unwrap_or_default()
}

fn put_string(dataset: &mut InMemDicomObject, tag: Tag, vr: VR, value: &str) {
    dataset.put(DataElement::new(tag, vr, PrimitiveValue::from(value.to_string())));
}

fn put_decimal(dataset: &mut InMemDicomObject, tag: Tag, value: f64) {
    dataset.put(DataElement::new(
        tag,
        VR::DS,
        PrimitiveValue::from(format_decimal_string(value)),
    ));
}

fn put_sequence(dataset: &mut InMemDicomObject, tag: Tag, items: Vec<InMemDicomObject>) {
    dataset.put(DataElement::new(tag, VR::SQ, DataSetSequence::from(items)));
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use dicom_object::mem::InMemElement;

    fn decimal(tag: Tag, value: &str) -> InMemElement {
        DataElement::new(tag, VR::DS, PrimitiveValue::from(value))
    }

    fn sequence(tag: Tag, items: Vec<InMemDicomObject>) -> InMemElement {
        DataElement::new(tag, VR::SQ, DataSetSequence::from(items))
    }

    fn control_point(cumulative: &str, weights: &[f32]) -> InMemDicomObject {
        InMemDicomObject::from_element_iter([
            decimal(tags::CUMULATIVE_METERSET_WEIGHT, cumulative),
            DataElement::new(
                tags::SCAN_SPOT_METERSET_WEIGHTS,
                VR::FL,
                PrimitiveValue::F32(weights.iter().copied().collect()),
            ),
        ])
    }

    /// A two-layer plan data set with a 100 MU, 2 Gy beam.
    pub(crate) fn sample_dataset() -> InMemDicomObject {
        let referenced_beam = InMemDicomObject::from_element_iter([
            decimal(tags::BEAM_DOSE, "2.0"),
            decimal(tags::BEAM_METERSET, "100.0"),
        ]);
        let fraction_group = InMemDicomObject::from_element_iter([sequence(
            tags::REFERENCED_BEAM_SEQUENCE,
            vec![referenced_beam],
        )]);
        let beam = InMemDicomObject::from_element_iter([
            decimal(tags::FINAL_CUMULATIVE_METERSET_WEIGHT, "40.0"),
            DataElement::new(tags::NUMBER_OF_CONTROL_POINTS, VR::IS, PrimitiveValue::from("4")),
            sequence(
                tags::ION_CONTROL_POINT_SEQUENCE,
                vec![
                    control_point("0.0", &[10.0, 0.0, 5.0]),
                    control_point("15.0", &[0.0, 0.0, 0.0]),
                    control_point("15.0", &[5.0, 20.0]),
                    control_point("40.0", &[0.0, 0.0]),
                ],
            ),
        ]);

        InMemDicomObject::from_element_iter([
            DataElement::new(tags::RT_PLAN_LABEL, VR::SH, PrimitiveValue::from("ORIGINAL")),
            DataElement::new(tags::RT_PLAN_DATE, VR::DA, PrimitiveValue::from("20240101")),
            DataElement::new(tags::RT_PLAN_TIME, VR::TM, PrimitiveValue::from("120000")),
            sequence(tags::FRACTION_GROUP_SEQUENCE, vec![fraction_group]),
            sequence(tags::ION_BEAM_SEQUENCE, vec![beam]),
        ])
    }

    #[test]
    fn read_plan_extracts_all_rescaling_fields() {
        let plan = read_plan(&sample_dataset()).unwrap();

        assert_eq!(plan.label, "ORIGINAL");
        assert_eq!(plan.date, "20240101");
        assert_eq!(plan.time, "120000");
        assert_eq!(plan.referenced_beam.beam_dose, 2.0);
        assert_eq!(plan.referenced_beam.beam_meterset, 100.0);
        assert_eq!(plan.beam.final_cumulative_meterset_weight, 40.0);
        assert_eq!(plan.beam.number_of_control_points, 4);
        assert_eq!(plan.beam.control_points.len(), 4);
        assert_eq!(
            plan.beam.control_points[0].scan_spot_meterset_weights,
            vec![10.0, 0.0, 5.0]
        );
        assert_eq!(plan.beam.control_points[3].cumulative_meterset_weight, 40.0);
    }

    #[test]
    fn read_plan_reports_missing_beam_sequence() {
        let mut dataset = sample_dataset();
        dataset.remove_element(tags::ION_BEAM_SEQUENCE);

        let result = read_plan(&dataset);
        assert!(matches!(
            result,
            Err(PlanIoError::MissingAttribute("IonBeamSequence"))
        ));
    }

    #[test]
    fn write_plan_round_trips_modified_fields() {
        let mut dataset = sample_dataset();
        let mut plan = read_plan(&dataset).unwrap();
        plan.label = "RESCALED".to_string();
        plan.referenced_beam.beam_meterset = 200.0;
        plan.referenced_beam.beam_dose = 4.0;
        plan.beam.final_cumulative_meterset_weight = 80.0;
        plan.beam.control_points[2].scan_spot_meterset_weights = vec![0.0, 40.0];
        plan.beam.control_points[2].cumulative_meterset_weight = 30.0;

        write_plan(&mut dataset, &plan).unwrap();
        let reread = read_plan(&dataset).unwrap();

        assert_eq!(reread, plan);
    }

    #[test]
    fn write_plan_rejects_control_point_count_change() {
        let mut dataset = sample_dataset();
        let mut plan = read_plan(&dataset).unwrap();
        plan.beam.control_points.pop();

        let result = write_plan(&mut dataset, &plan);
        assert!(matches!(result, Err(PlanIoError::Inconsistency(_))));
    }

    /// Wraps a data set in a file meta table so it can be written to disk.
    pub(crate) fn sample_file(dataset: InMemDicomObject) -> DefaultDicomObject {
        use dicom_object::meta::FileMetaTableBuilder;

        dataset
            .with_meta(
                FileMetaTableBuilder::new()
                    .transfer_syntax("1.2.840.10008.1.2.1")
                    .media_storage_sop_class_uid("1.2.840.10008.5.1.4.1.1.481.8")
                    .media_storage_sop_instance_uid("2.25.1234"),
            )
            .unwrap()
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn plan_file_write_preserves_unmodelled_attributes() {
        use tempfile::tempdir;

        const PATIENT_NAME: Tag = Tag(0x0010, 0x0010);

        let mut dataset = sample_dataset();
        dataset.put(DataElement::new(
            PATIENT_NAME,
            VR::PN,
            PrimitiveValue::from("Phantom^Water"),
        ));
        let object = sample_file(dataset);

        let dir = tempdir().unwrap();
        let input = dir.path().join("input.dcm");
        let output = dir.path().join("output.dcm");
        object.write_to_file(&input).unwrap();

        let (mut plan, metadata) = DicomPlanFile::read_from_path(&input).unwrap();
        plan.referenced_beam.beam_meterset = 123.456;
        DicomPlanFile::write_to_path(&plan, &metadata, &output).unwrap();

        let (reread, reread_metadata) = DicomPlanFile::read_from_path(&output).unwrap();
        assert_eq!(reread.referenced_beam.beam_meterset, 123.456);
        let patient_name = reread_metadata
            .object
            .element(PATIENT_NAME)
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(patient_name.trim_end(), "Phantom^Water");

        let (untouched, _) = DicomPlanFile::read_from_path(&input).unwrap();
        assert_eq!(untouched.referenced_beam.beam_meterset, 100.0);
    }

    #[test]
    fn failed_write_leaves_no_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.dcm");
        sample_file(sample_dataset()).write_to_file(&input).unwrap();
        let (plan, metadata) = DicomPlanFile::read_from_path(&input).unwrap();

        // A directory in place of the output makes the final rename fail.
        let blocked = dir.path().join("output.dcm");
        fs::create_dir(&blocked).unwrap();
        let result = DicomPlanFile::write_to_path(&plan, &metadata, &blocked);
        assert!(matches!(result, Err(PlanIoError::Write { .. })));
        assert!(blocked.is_dir());

        let missing_parent = dir.path().join("absent").join("output.dcm");
        let result = DicomPlanFile::write_to_path(&plan, &metadata, &missing_parent);
        assert!(matches!(result, Err(PlanIoError::Write { .. })));
        assert!(!missing_parent.exists());

        assert_eq!(entries(dir.path()), vec!["input.dcm", "output.dcm"]);
    }

    #[test]
    fn write_replaces_existing_output_without_staging_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.dcm");
        let output = dir.path().join("output.dcm");
        sample_file(sample_dataset()).write_to_file(&input).unwrap();
        fs::write(&output, b"stale").unwrap();

        let (mut plan, metadata) = DicomPlanFile::read_from_path(&input).unwrap();
        plan.referenced_beam.beam_dose = 3.0;
        DicomPlanFile::write_to_path(&plan, &metadata, &output).unwrap();

        let (reread, _) = DicomPlanFile::read_from_path(&output).unwrap();
        assert_eq!(reread.referenced_beam.beam_dose, 3.0);
        assert_eq!(entries(dir.path()), vec!["input.dcm", "output.dcm"]);
    }

    #[test]
    fn write_plan_rejects_label_longer_than_short_string() {
        let mut dataset = sample_dataset();
        let mut plan = read_plan(&dataset).unwrap();
        plan.label = "A".repeat(MAX_SHORT_STRING_LEN + 1);

        let result = write_plan(&mut dataset, &plan);
        assert!(matches!(
            result,
            Err(PlanIoError::InvalidAttribute {
                attribute: "RTPlanLabel",
                ..
            })
        ));

        plan.label = "A".repeat(MAX_SHORT_STRING_LEN);
        write_plan(&mut dataset, &plan).unwrap();
        assert_eq!(read_plan(&dataset).unwrap().label.len(), MAX_SHORT_STRING_LEN);
    }

    #[test]
    fn absent_date_and_time_are_not_created() {
        let mut dataset = sample_dataset();
        dataset.remove_element(tags::RT_PLAN_DATE);
        dataset.remove_element(tags::RT_PLAN_TIME);
        let plan = read_plan(&dataset).unwrap();
        assert!(plan.date.is_empty());

        write_plan(&mut dataset, &plan).unwrap();

        assert!(dataset.element(tags::RT_PLAN_DATE).is_err());
        assert!(dataset.element(tags::RT_PLAN_TIME).is_err());
    }

    #[test]
    fn stored_cumulative_weights_match_stored_spot_weights() {
        use crate::engine::config::RescaleConfigBuilder;
        use crate::engine::progress::ProgressReporter;
        use crate::workflows::rescale;

        let mut dataset = sample_dataset();
        let original = read_plan(&dataset).unwrap();
        let config = RescaleConfigBuilder::new()
            .scale_factor(1.3)
            .layer_weights(vec![0.77, 1.19])
            .build()
            .unwrap();
        let result = rescale::run(&original, &config, &ProgressReporter::new()).unwrap();

        write_plan(&mut dataset, &result.plan).unwrap();
        let stored = read_plan(&dataset).unwrap();

        let relative = |a: f64, b: f64| ((a - b) / b).abs();
        let mut running = 0.0;
        for control_point in &stored.beam.control_points {
            if running > 0.0 {
                assert!(relative(control_point.cumulative_meterset_weight, running) < 1e-12);
            } else {
                assert_eq!(control_point.cumulative_meterset_weight, 0.0);
            }
            running += control_point.total_weight();
        }
        assert!(relative(stored.beam.final_cumulative_meterset_weight, running) < 1e-12);
    }
}
