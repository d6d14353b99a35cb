//! SVG bar chart rendering. Pure string building, no I/O.

use crate::rank::RankedLanguage;
use crate::theme::Theme;

const WIDTH: u32 = 320;
const START_Y: u32 = 40;
const ROW_HEIGHT: u32 = 26;
const LABEL_X: u32 = 20;
const PERCENT_X: u32 = 300;
const BAR_HEIGHT: u32 = 8;
// 100% maps to a 200-unit bar.
const BAR_UNITS_PER_PERCENT: f64 = 2.0;

pub struct RenderedChart {
    pub svg: String,
    pub height: u32,
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Render one row per ranked language inside a themed frame.
///
/// The document is well-formed for any input; an empty ranking renders just
/// the background and header at the minimum height.
pub fn render(entries: &[RankedLanguage], theme: &Theme) -> RenderedChart {
    let mut y = START_Y;
    let mut rows = String::new();

    for entry in entries {
        let bar_width = entry.percent * BAR_UNITS_PER_PERCENT;
        rows.push_str(&format!(
            r#"  <text x="{LABEL_X}" y="{y}" fill="{text}" font-size="12">{label}</text>
  <text x="{PERCENT_X}" y="{y}" fill="{text}" font-size="12" text-anchor="end">{percent:.1}%</text>
  <rect x="{LABEL_X}" y="{bar_y}" width="{bar_width}" height="{BAR_HEIGHT}" fill="{bar}" rx="4"/>
"#,
            text = theme.text,
            label = escape_xml(&entry.name),
            percent = entry.percent,
            bar_y = y + 6,
            bar = theme.bar,
        ));
        y += ROW_HEIGHT;
    }

    let svg = format!(
        r#"<svg width="{WIDTH}" height="{y}" viewBox="0 0 {WIDTH} {y}" xmlns="http://www.w3.org/2000/svg">
  <style>
    text {{ font-family: system-ui, -apple-system, BlinkMacSystemFont; }}
  </style>
  <rect width="100%" height="100%" fill="{bg}" rx="12"/>
  <text x="20" y="24" fill="{text}" font-size="14" font-weight="600">Top Languages</text>
{rows}</svg>
"#,
        bg = theme.bg,
        text = theme.text,
    );

    RenderedChart { svg, height: y }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::DRACULA;

    fn entry(name: &str, bytes: u64, percent: f64) -> RankedLanguage {
        RankedLanguage {
            name: name.to_string(),
            bytes,
            percent,
        }
    }

    #[test]
    fn height_grows_by_row() {
        let chart = render(
            &[entry("Go", 800, 80.0), entry("Python", 200, 20.0)],
            &DRACULA,
        );
        assert_eq!(chart.height, 92);
        assert!(chart.svg.contains(r#"height="92""#));
        assert!(chart.svg.contains(">Go<"));
        assert!(chart.svg.contains(">80.0%<"));
    }

    #[test]
    fn bar_width_is_linear_in_percent() {
        let chart = render(&[entry("Rust", 1, 50.0)], &DRACULA);
        assert!(chart.svg.contains(r#"width="100""#));
    }

    #[test]
    fn empty_ranking_renders_frame_only() {
        let chart = render(&[], &DRACULA);
        assert_eq!(chart.height, 40);
        assert!(chart.svg.contains("Top Languages"));
        assert!(!chart.svg.contains("text-anchor"));
        assert!(chart.svg.contains(r##"fill="#282a36""##));
    }

    #[test]
    fn language_names_are_escaped() {
        let chart = render(&[entry("C<&>", 1, 100.0)], &DRACULA);
        assert!(chart.svg.contains("C&lt;&amp;&gt;"));
        assert!(!chart.svg.contains("C<&>"));
    }
}
