//! Export per-bar geometry to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::chart::{ChartScene, TooltipContent};
use crate::domain::{Quarter, observation_year};
use crate::error::AppError;

/// Write one row per bar of `scene` to a CSV file.
pub fn write_bars_csv(path: &Path, scene: &ChartScene) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_bars(file, scene)
}

fn write_bars<W: Write>(mut out: W, scene: &ChartScene) -> Result<(), AppError> {
    writeln!(out, "date,value,quarter,year,x,y,width,height,anchor")
        .map_err(|e| AppError::io(format!("Failed to write export CSV header: {e}")))?;

    for bar in &scene.bars {
        let obs = &bar.observation;
        let tooltip = TooltipContent::for_observation(obs);
        writeln!(
            out,
            "{},{},{},{},{:.4},{:.4},{:.4},{:.4},{}",
            obs.date,
            obs.value,
            Quarter::of(obs.date),
            observation_year(obs.date),
            bar.x,
            bar.y,
            bar.width,
            bar.height,
            tooltip.anchor.class_name(),
        )
        .map_err(|e| AppError::io(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartRenderer;
    use crate::config::ChartConfig;
    use crate::domain::{Dataset, Observation};
    use chrono::NaiveDate;

    #[test]
    fn csv_rows_follow_bars() {
        let d = |y, m| NaiveDate::from_ymd_opt(y, m, 1).unwrap();
        let ds = Dataset {
            data: vec![
                Observation::new(d(2006, 1), 500.0),
                Observation::new(d(2007, 1), 1000.0),
            ],
            from_date: d(2006, 1),
            to_date: d(2008, 1),
        };
        let scene = ChartRenderer::new(ChartConfig::default()).build(&ds);

        let mut buf = Vec::new();
        write_bars(&mut buf, &scene).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "date,value,quarter,year,x,y,width,height,anchor");
        assert_eq!(
            lines[1],
            "2006-01-01,500,Q1,2006,54.0000,205.0000,346.0000,165.0000,tooltip-top"
        );
        assert!(lines[2].ends_with(",tooltip-left"));
        assert!(lines[2].starts_with("2007-01-01,1000,Q1,2007,"));
    }
}
