//! Tabular projections of the current records, one per display tab.

use crate::domain::neo::NeoRecord;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Names,
    Hazardous,
    Diameter,
    Velocity,
    CloseApproach,
    MissDistance,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Names,
        View::Hazardous,
        View::Diameter,
        View::Velocity,
        View::CloseApproach,
        View::MissDistance,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            View::Names => "names",
            View::Hazardous => "hazardous",
            View::Diameter => "diameter",
            View::Velocity => "velocity",
            View::CloseApproach => "close-approach",
            View::MissDistance => "miss-distance",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Names => "NEO Names",
            View::Hazardous => "Hazardous",
            View::Diameter => "Diameter",
            View::Velocity => "Velocity",
            View::CloseApproach => "Close Approach",
            View::MissDistance => "Miss Distance",
        }
    }

    pub fn headers(self) -> &'static [&'static str] {
        match self {
            View::Names => &["Name"],
            View::Hazardous => &["Name", "Potentially Hazardous"],
            View::Diameter => &["Name", "Estimated Diameter (m)"],
            View::Velocity => &["Name", "Relative Velocity (km/h)"],
            View::CloseApproach => &["Name", "Close Approach Date"],
            View::MissDistance => &["Name", "Miss Distance (km)"],
        }
    }

    /// The view after this one, wrapping around at the end.
    pub fn next(self) -> View {
        let idx = Self::ALL.iter().position(|v| *v == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn row(self, record: &NeoRecord) -> Vec<String> {
        let name = record.name.clone();
        match self {
            View::Names => vec![name],
            View::Hazardous => {
                let flag = if record.is_potentially_hazardous { "Yes" } else { "No" };
                vec![name, flag.to_string()]
            }
            View::Diameter => vec![name, format!("{:.2}", record.estimated_diameter_meters)],
            View::Velocity => vec![name, format!("{:.2}", record.relative_velocity_kmh)],
            View::CloseApproach => vec![name, record.close_approach_date.clone()],
            View::MissDistance => vec![name, format!("{:.2}", record.miss_distance_km)],
        }
    }

    pub fn table(self, records: &[NeoRecord]) -> ViewTable {
        ViewTable {
            title: self.title(),
            headers: self.headers().to_vec(),
            rows: records.iter().map(|r| self.row(r)).collect(),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for View {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        View::ALL
            .into_iter()
            .find(|v| v.slug() == wanted)
            .ok_or_else(|| anyhow::anyhow!("unknown view {s:?}"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewTable {
    pub title: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl ViewTable {
    /// Left-aligned, space-padded columns under a title line.
    pub fn render_text(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        out.push_str(self.title);
        out.push('\n');
        push_line(&mut out, self.headers.iter().copied(), &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, rule.iter().map(String::as_str), &widths);
        for row in &self.rows {
            push_line(&mut out, row.iter().map(String::as_str), &widths);
        }
        out
    }
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
