use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::{Context, ensure};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use svg::node::element::Path;
use svg::node::element::path::Data;

use crate::geometry::Point;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgDrawOptions {
    ///The theme to use for the svg
    #[serde(default)]
    pub theme: SvgLayoutTheme,
    ///Draw a grid over the floor
    #[serde(default = "default_true")]
    pub grid: bool,
    ///Spacing of the grid lines (m)
    #[serde(default = "default_grid_spacing")]
    pub grid_spacing: f64,
    ///Label every flow arrow with its length
    #[serde(default = "default_true")]
    pub flow_labels: bool,
    ///Fill machines which are not fully on the floor with the highlight color
    #[serde(default = "default_true")]
    pub highlight_out_of_bounds: bool,
}

fn default_true() -> bool {
    true
}

fn default_grid_spacing() -> f64 {
    5.0
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgLayoutTheme::default(),
            grid: true,
            grid_spacing: default_grid_spacing(),
            flow_labels: true,
            highlight_out_of_bounds: true,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgLayoutTheme {
    pub stroke_width_multiplier: f64,
    pub floor_fill: Color,
    pub grid_stroke: Color,
    pub machine_fill: Color,
    pub machine_stroke: Color,
    pub flow_stroke: Color,
    pub highlight_fill: Color,
}

impl Default for SvgLayoutTheme {
    fn default() -> Self {
        SvgLayoutTheme::BLUEPRINT
    }
}

impl SvgLayoutTheme {
    pub const BLUEPRINT: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width_multiplier: 2.0,
        floor_fill: Color(0xFF, 0xFF, 0xFF),
        grid_stroke: Color(0xB0, 0xB0, 0xB0),
        machine_fill: Color(0xAD, 0xD8, 0xE6), // LIGHT BLUE
        machine_stroke: Color(0x00, 0x00, 0xFF), // BLUE
        flow_stroke: Color(0xFF, 0x00, 0x00),  // RED
        highlight_fill: Color(0xFF, 0xA5, 0x00), // ORANGE
    };
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Color(pub u8, pub u8, pub u8);

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        ensure!(
            hex.len() == 6 && hex.is_ascii(),
            "invalid color, expected #RRGGBB: {s}"
        );
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).with_context(|| format!("invalid color: {s}"))
        };
        Ok(Color(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::from_str(&s).map_err(serde::de::Error::custom)
    }
}

pub fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}

/// Multiples of `spacing` in `[0, extent]`
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn ticks(extent: f64, spacing: f64) -> Vec<f64> {
    if !(spacing > 0.0) || !(extent >= 0.0) {
        return vec![];
    }
    let n = (extent / spacing).floor() as usize;
    (0..=n).map(|i| i as f64 * spacing).collect()
}

/// Horizontal and vertical lines every `spacing` units, covering `[0, length] x [0, height]` in svg coordinates
pub fn grid_data(length: f64, height: f64, spacing: f64) -> Data {
    let mut data = Data::new();
    for x in ticks(length, spacing) {
        let x = x as f32;
        data = data.move_to((x, 0.0f32)).line_to((x, height as f32));
    }
    for y in ticks(height, spacing) {
        let y = (height - y) as f32;
        data = data.move_to((0.0f32, y)).line_to((length as f32, y));
    }
    data
}

/// Position for the label of an arrow from `start` to `end`: the midpoint, pushed sideways by `offset`
pub fn arrow_label_position(start: Point, end: Point, offset: f64) -> Point {
    let mid = start.midpoint(&end);
    let length = start.distance(&end);
    if length == 0.0 {
        return mid;
    }
    Point(
        mid.0 + (end.1 - start.1) / length * offset,
        mid.1 + (start.0 - end.0) / length * offset,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_parsing() {
        let c: Color = "#ADD8E6".parse().unwrap();
        assert_eq!(c, Color(0xAD, 0xD8, 0xE6));
        assert_eq!(c.to_string(), "#ADD8E6");
        assert!("#12".parse::<Color>().is_err());
        assert!("#GG0000".parse::<Color>().is_err());
    }

    #[test]
    fn ticks_every_spacing() {
        assert_eq!(ticks(30.0, 5.0), vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0]);
        assert_eq!(ticks(12.0, 5.0), vec![0.0, 5.0, 10.0]);
        assert!(ticks(30.0, 0.0).is_empty());
        assert!(ticks(f64::NAN, 5.0).is_empty());
    }

    #[test]
    fn label_is_offset_perpendicular() {
        let p = arrow_label_position(Point(0.0, 0.0), Point(10.0, 0.0), 0.5);
        assert_eq!(p, Point(5.0, -0.5));
        let p = arrow_label_position(Point(3.0, 3.0), Point(3.0, 3.0), 0.5);
        assert_eq!(p, Point(3.0, 3.0));
    }
}
