//! Aggregation and PNG encoding for the GDP summary chart.
//!
//! The image holds one bar per region next to a ranked strip of the top
//! countries, lettered with the bitmap font in `glyphs`. A footer carries
//! the row count and refresh time. The same summary is also written as
//! `tEXt` chunks for tools that read metadata instead of pixels.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use super::chart_errors::ChartError;
use super::chart_model::{GdpSummary, RegionTotal, TopCountry};
use super::glyphs::{glyph, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::constants::CHART_TOP_COUNTRIES;
use crate::countries::Country;
use crate::utils::time_utils::format_utc_iso;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 480;
const MARGIN: u32 = 40;
const BAR_GAP: u32 = 12;

// Region plot on the left.
const PLOT_TOP: u32 = 64;
const PLOT_RIGHT: u32 = 470;
const BASELINE: u32 = 400;

// Ranked top-country strip on the right.
const PANEL_LEFT: u32 = 500;
const PANEL_WIDTH: u32 = 260;
const PANEL_TOP: u32 = 64;
const ROW_HEIGHT: u32 = 56;
const ROW_BAR_OFFSET: u32 = 12;
const ROW_BAR_HEIGHT: u32 = 14;

const FOOTER_TOP: u32 = HEIGHT - 24;
const ADVANCE: u32 = GLYPH_WIDTH + 1;

const BACKGROUND: [u8; 3] = [255, 255, 255];
const AXIS: [u8; 3] = [40, 40, 40];
const INK: [u8; 3] = [20, 20, 20];
const BAR_FROM: [u8; 3] = [31, 119, 180];
const BAR_TO: [u8; 3] = [44, 160, 44];
const TOP_BAR: [u8; 3] = [255, 127, 14];

/// Keywords of the text chunks, in write order.
pub const TEXT_KEYS: [&str; 5] = [
    "Title",
    "Region Totals",
    "Top Countries",
    "Total Countries",
    "Last Refreshed",
];

pub fn summarize(
    countries: &[Country],
    last_refreshed_at: Option<NaiveDateTime>,
) -> Result<GdpSummary, ChartError> {
    if countries.is_empty() {
        return Err(ChartError::NoCountries);
    }

    let mut totals: HashMap<&str, f64> = HashMap::new();
    for country in countries {
        let (Some(region), Some(gdp)) = (country.region.as_deref(), country.estimated_gdp) else {
            continue;
        };
        if gdp == 0.0 || !gdp.is_finite() {
            continue;
        }
        *totals.entry(region).or_insert(0.0) += gdp;
    }
    if totals.is_empty() {
        return Err(ChartError::NoGdpData);
    }

    let mut regions: Vec<RegionTotal> = totals
        .into_iter()
        .map(|(region, total_gdp)| RegionTotal {
            region: region.to_string(),
            total_gdp,
        })
        .collect();
    regions.sort_by(|a, b| {
        b.total_gdp
            .total_cmp(&a.total_gdp)
            .then_with(|| a.region.cmp(&b.region))
    });

    let mut top_countries: Vec<TopCountry> = countries
        .iter()
        .filter_map(|c| {
            c.estimated_gdp
                .filter(|g| g.is_finite())
                .map(|estimated_gdp| TopCountry {
                    name: c.name.clone(),
                    estimated_gdp,
                })
        })
        .collect();
    top_countries.sort_by(|a, b| b.estimated_gdp.total_cmp(&a.estimated_gdp));
    top_countries.truncate(CHART_TOP_COUNTRIES);

    Ok(GdpSummary {
        regions,
        top_countries,
        total_countries: countries.len(),
        last_refreshed_at,
    })
}

pub fn render_png(summary: &GdpSummary) -> Result<Vec<u8>, ChartError> {
    let mut canvas = Canvas::new();
    let text = summary_text(summary);

    canvas.text(MARGIN, 16, &text[0], 2, INK);
    draw_regions(&mut canvas, summary);
    draw_top_countries(&mut canvas, summary);
    canvas.text(
        MARGIN,
        FOOTER_TOP,
        &format!("Countries: {}   Last refreshed: {}", text[3], text[4]),
        1,
        INK,
    );

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, WIDTH, HEIGHT);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        for (key, text) in TEXT_KEYS.iter().zip(text) {
            encoder.add_text_chunk(key.to_string(), latin1(&text))?;
        }
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&canvas.pixels)?;
        writer.finish()?;
    }
    Ok(out)
}

fn summary_text(summary: &GdpSummary) -> [String; 5] {
    let regions = summary
        .regions
        .iter()
        .map(|r| format!("{}: {:.2}T", r.region, r.total_gdp / 1e12))
        .collect::<Vec<_>>()
        .join("\n");
    let top = summary
        .top_countries
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {}: {:.2}B", i + 1, c.name, c.estimated_gdp / 1e9))
        .collect::<Vec<_>>()
        .join("\n");
    let refreshed = summary
        .last_refreshed_at
        .map(format_utc_iso)
        .unwrap_or_else(|| "never".to_string());

    [
        "Estimated GDP by Region".to_string(),
        regions,
        top,
        summary.total_countries.to_string(),
        refreshed,
    ]
}

/// tEXt chunks are ISO 8859-1.
fn latin1(text: &str) -> String {
    text.chars()
        .map(|c| if (c as u32) <= 0xFF { c } else { '?' })
        .collect()
}

fn draw_regions(canvas: &mut Canvas, summary: &GdpSummary) {
    let plot_w = PLOT_RIGHT - MARGIN;
    let plot_h = BASELINE - PLOT_TOP;

    canvas.fill_rect(MARGIN, BASELINE, plot_w, 2, AXIS);
    canvas.fill_rect(MARGIN - 2, PLOT_TOP, 2, plot_h + 2, AXIS);

    let count = summary.regions.len() as u32;
    let max = summary
        .regions
        .first()
        .map(|r| r.total_gdp)
        .unwrap_or(0.0);
    if count == 0 || max <= 0.0 {
        return;
    }

    let slot = plot_w / count;
    let bar_w = slot.saturating_sub(BAR_GAP).max(1);
    let label_chars = (bar_w / ADVANCE).max(1) as usize;
    for (i, region) in summary.regions.iter().enumerate() {
        let ratio = (region.total_gdp / max).clamp(0.0, 1.0);
        let bar_h = ((plot_h as f64) * ratio).round().max(1.0) as u32;
        let x = MARGIN + i as u32 * slot + BAR_GAP / 2;
        let t = if count > 1 {
            i as f64 / (count - 1) as f64
        } else {
            0.0
        };
        canvas.fill_rect(x, BASELINE - bar_h, bar_w, bar_h, blend(t));

        let value = format!("{:.2}T", region.total_gdp / 1e12);
        canvas.text(x, BASELINE - bar_h - GLYPH_HEIGHT - 3, &fit(&value, label_chars), 1, INK);
        canvas.text(x, BASELINE + 8, &fit(&region.region, label_chars), 1, INK);
    }
}

fn row_top(rank: usize) -> u32 {
    PANEL_TOP + 20 + rank as u32 * ROW_HEIGHT
}

fn draw_top_countries(canvas: &mut Canvas, summary: &GdpSummary) {
    canvas.text(
        PANEL_LEFT,
        PANEL_TOP,
        &format!("Top {} by estimated GDP", CHART_TOP_COUNTRIES),
        1,
        INK,
    );

    let max = summary
        .top_countries
        .first()
        .map(|c| c.estimated_gdp)
        .unwrap_or(0.0);
    let label_chars = (PANEL_WIDTH / ADVANCE) as usize;
    for (rank, country) in summary.top_countries.iter().enumerate() {
        let top = row_top(rank);
        let label = format!(
            "{}. {} {:.2}B",
            rank + 1,
            country.name,
            country.estimated_gdp / 1e9
        );
        canvas.text(PANEL_LEFT, top, &fit(&label, label_chars), 1, INK);

        if max > 0.0 {
            let ratio = (country.estimated_gdp / max).clamp(0.0, 1.0);
            let bar_w = ((PANEL_WIDTH as f64) * ratio).round().max(1.0) as u32;
            canvas.fill_rect(PANEL_LEFT, top + ROW_BAR_OFFSET, bar_w, ROW_BAR_HEIGHT, TOP_BAR);
        }
    }
}

fn fit(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn blend(t: f64) -> [u8; 3] {
    let mut rgb = [0u8; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        let from = f64::from(BAR_FROM[i]);
        let to = f64::from(BAR_TO[i]);
        *channel = (from + (to - from) * t).round() as u8;
    }
    rgb
}

struct Canvas {
    pixels: Vec<u8>,
}

impl Canvas {
    fn new() -> Self {
        let mut pixels = Vec::with_capacity((WIDTH * HEIGHT * 3) as usize);
        for _ in 0..WIDTH * HEIGHT {
            pixels.extend_from_slice(&BACKGROUND);
        }
        Self { pixels }
    }

    /// Clipped to the image bounds.
    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: [u8; 3]) {
        let x_end = x.saturating_add(w).min(WIDTH);
        let y_end = y.saturating_add(h).min(HEIGHT);
        for row in y..y_end {
            for col in x..x_end {
                let idx = ((row * WIDTH + col) * 3) as usize;
                self.pixels[idx..idx + 3].copy_from_slice(&color);
            }
        }
    }

    fn text(&mut self, x: u32, y: u32, text: &str, scale: u32, color: [u8; 3]) {
        let mut cursor = x;
        for c in text.chars() {
            for (dy, bits) in (0u32..).zip(glyph(c)) {
                for dx in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - dx)) != 0 {
                        self.fill_rect(cursor + dx * scale, y + dy * scale, scale, scale, color);
                    }
                }
            }
            cursor += ADVANCE * scale;
        }
    }
}
