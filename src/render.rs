/// Plain-text chart surface
use std::io::Write;

use crate::dashboard::{ChartSurface, DashboardFrame};
use crate::models::NormalizedSeries;

/// Writes frames as text to any writer (stdout in the binary)
pub struct TextChart<W: Write> {
    out: W,
}

impl<W: Write> TextChart<W> {
    pub fn new(out: W) -> Self {
        TextChart { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn draw_series(&mut self, series: &NormalizedSeries) -> std::io::Result<()> {
        let points: Vec<_> = series
            .timestamps
            .iter()
            .zip(&series.temperature)
            .zip(&series.humidity)
            .zip(&series.occupied)
            .collect();

        writeln!(self.out, "History ({} points):", points.len())?;
        for (((label, temperature), humidity), occupied) in points {
            writeln!(
                self.out,
                "  {:>5}  {:>6.1}°  {:>5.1}%  {}",
                label,
                temperature,
                humidity,
                if *occupied { "occupied" } else { "vacant" }
            )?;
        }
        Ok(())
    }
}

impl<W: Write> ChartSurface for TextChart<W> {
    fn draw(&mut self, frame: &DashboardFrame) -> std::io::Result<()> {
        match &frame.current {
            Some(current) => writeln!(
                self.out,
                "Current: {:.1}°, {:.1}% RH, {}, fan {} ({})",
                current.sample.temperature,
                current.sample.humidity,
                if current.sample.occupied { "occupied" } else { "vacant" },
                if current.fan_state { "on" } else { "off" },
                current.sample.timestamp
            )?,
            None => writeln!(self.out, "Current: unavailable")?,
        }

        if let Some(comfort) = &frame.comfort {
            writeln!(
                self.out,
                "Comfort: temperature {}, humidity {}, fan should be {}",
                comfort.temperature,
                comfort.humidity,
                if comfort.fan_on { "on" } else { "off" }
            )?;
        }

        if let Some(series) = &frame.history {
            self.draw_series(series)?;
        }

        self.out.flush()
    }
}
