//! Scorecard export formats. JSON is a direct `serde_json`
//! serialization of the [`ScorecardRecord`]; CSV is a flat
//! denormalization via the `csv` crate with a fixed header row.

use crate::error::ResultsResult;
use crate::types::ScorecardRecord;
use serde::Serialize;
use tse_engine::Scorecard;

pub fn scorecard_to_json(record: &ScorecardRecord) -> ResultsResult<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

pub fn scorecards_to_jsonl(records: &[ScorecardRecord]) -> ResultsResult<String> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    Ok(out)
}

#[derive(Debug, Clone, Serialize)]
struct ScorecardCsvRow {
    run_id: String,
    timestamp: String,
    experiment_id: String,
    sim_time_s: f64,
    substance_id: String,
    pot_temperature_c: f64,
    effective_boiling_point_c: f64,
    time_to_boil_s: f64,
    burner_step: usize,
    altitude_m: f64,
    pressure_pa: f64,
    room_temperature_delta_c: Option<f64>,
    peak_o2_ppm: Option<f64>,
    peak_co2_ppm: Option<f64>,
    peak_nh3_ppm: Option<f64>,
    alert_count: Option<usize>,
}

impl ScorecardCsvRow {
    fn from_record(record: &ScorecardRecord) -> Self {
        let room = record.scorecard.room.as_ref();
        ScorecardCsvRow {
            run_id: record.manifest.run_id.clone(),
            timestamp: record.manifest.timestamp.clone(),
            experiment_id: record.manifest.experiment_id.clone(),
            sim_time_s: record.scorecard.sim_time_s,
            substance_id: record.scorecard.pot.substance_id.clone(),
            pot_temperature_c: record.scorecard.pot.temperature_c,
            effective_boiling_point_c: record.scorecard.pot.effective_boiling_point_c,
            time_to_boil_s: record.scorecard.pot.time_to_boil_s,
            burner_step: record.scorecard.pot.burner_step,
            altitude_m: record.scorecard.pot.altitude_m,
            pressure_pa: record.scorecard.pot.pressure_pa,
            room_temperature_delta_c: room.map(|r| r.temperature_delta_c),
            peak_o2_ppm: room.and_then(|r| r.peak_hazard_ppm.get("o2").copied()),
            peak_co2_ppm: room.and_then(|r| r.peak_hazard_ppm.get("co2").copied()),
            peak_nh3_ppm: room.and_then(|r| r.peak_hazard_ppm.get("nh3").copied()),
            alert_count: room.map(|r| r.alert_log.len()),
        }
    }
}

/// One summary row per scorecard (fixed header, flat denormalization).
pub fn scorecards_to_csv(records: &[ScorecardRecord]) -> ResultsResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(ScorecardCsvRow::from_record(record))?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[derive(Debug, Clone, Serialize)]
struct IdealTimeCsvRow {
    run_id: String,
    burner_step: usize,
    watts: f64,
    ideal_time_s: f64,
}

/// The per-burner-step energy/power table a scorecard carries
/// (spec.md §4.6), flattened across every scorecard in `records`.
pub fn ideal_times_to_csv(records: &[ScorecardRecord]) -> ResultsResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        for step in &record.scorecard.ideal_times {
            writer.serialize(IdealTimeCsvRow {
                run_id: record.manifest.run_id.clone(),
                burner_step: step.burner_step,
                watts: step.watts,
                ideal_time_s: step.ideal_time_s,
            })?;
        }
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn to_record(
    manifest: crate::types::ScorecardManifest,
    scorecard: Scorecard,
) -> ScorecardRecord {
    ScorecardRecord { manifest, scorecard }
}
