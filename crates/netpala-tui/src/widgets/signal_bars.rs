//! Signal quality bars, ▂▄▆█ with color thresholds.

use ratatui::style::Style;
use ratatui::text::Span;

use crate::theme;

/// Styled bars plus the percentage for a 0–100 quality value.
///
/// | Bars   | Quality | Color |
/// |--------|---------|-------|
/// | `▂▄▆█` | >= 75   | Mint  |
/// | `▂▄▆ ` | >= 50   | Sky   |
/// | `▂▄  ` | >= 25   | Amber |
/// | `▂   ` | >= 1    | Rose  |
/// | `····` | 0       | Dim   |
pub fn signal_span(quality: u8) -> Span<'static> {
    let (bars, color) = match quality {
        75.. => ("▂▄▆█", theme::MINT),
        50..=74 => ("▂▄▆ ", theme::SKY),
        25..=49 => ("▂▄  ", theme::AMBER),
        1..=24 => ("▂   ", theme::ROSE),
        0 => return Span::styled("····", Style::default().fg(theme::SLATE_DIM)),
    };
    Span::styled(format!("{bars} {quality:>3}%"), Style::default().fg(color))
}
