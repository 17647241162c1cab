use svg::Document;
use svg::node::element::{Definitions, Group, Line, Marker, Rectangle, Text, Title};

use crate::cost;
use crate::entities::{Floor, Layout};
use crate::geometry::Point;
use crate::io::svg::svg_util;
use crate::io::svg::svg_util::SvgDrawOptions;

/// Draws the floor, every machine and an arrow for every leg of the flow.
/// The floor's origin is placed bottom-left, as in the layout's own coordinate system.
/// If `total_time` is given, it is printed in the top-left corner of the floor.
pub fn layout_to_svg(
    layout: &Layout,
    floor: &Floor,
    options: SvgDrawOptions,
    title: &str,
    total_time: Option<f64>,
) -> Document {
    let theme = &options.theme;
    let (length, width) = (floor.length, floor.width);

    // svg's y-axis points down, flip it so (0, 0) is the bottom-left corner of the floor
    let to_svg = |p: Point| -> (f64, f64) { (p.0, width - p.1) };

    let margin = 0.05 * f64::max(length, width);
    let font_size = 0.03 * f64::min(length, width);
    let stroke_width = f64::min(length, width) * 0.001 * theme.stroke_width_multiplier;

    // room for the title above and the axis labels below/left of the floor
    let vbox = (
        -margin - 3.0 * font_size,
        -margin - 1.5 * font_size,
        length + 2.0 * margin + 3.0 * font_size,
        width + 2.0 * margin + 4.5 * font_size,
    );

    let label = Text::new(format!(
        "{} | {} machines | flow distance: {:.1} m",
        title,
        layout.len(),
        layout.flow_distance()
    ))
    .set("x", 0.0)
    .set("y", -0.5 * font_size)
    .set("font-size", 1.2 * font_size)
    .set("font-family", "monospace")
    .set("font-weight", "500");

    let floor_group = {
        let mut floor_group = Group::new().set("id", "floor").add(
            Rectangle::new()
                .set("x", 0.0)
                .set("y", 0.0)
                .set("width", length)
                .set("height", width)
                .set("fill", theme.floor_fill.to_string())
                .set("stroke", "black")
                .set("stroke-width", 2.0 * stroke_width)
                .add(Title::new(format!("floor: {length} x {width}"))),
        );
        if options.grid {
            floor_group = floor_group.add(svg_util::data_to_path(
                svg_util::grid_data(length, width, options.grid_spacing),
                &[
                    ("fill", "none"),
                    ("stroke", &*theme.grid_stroke.to_string()),
                    ("stroke-width", &*format!("{}", 0.5 * stroke_width)),
                ],
            ));
        }
        floor_group
    };

    let axes_group = {
        let tick_text = |content: String, x: f64, y: f64, anchor: &str| {
            Text::new(content)
                .set("x", x)
                .set("y", y)
                .set("font-size", 0.8 * font_size)
                .set("font-family", "sans-serif")
                .set("text-anchor", anchor)
                .set("dominant-baseline", "middle")
        };
        let mut axes_group = Group::new().set("id", "axes");
        for x in svg_util::ticks(length, options.grid_spacing) {
            let (sx, sy) = to_svg(Point(x, 0.0));
            axes_group = axes_group.add(tick_text(format!("{x}"), sx, sy + font_size, "middle"));
        }
        for y in svg_util::ticks(width, options.grid_spacing) {
            let (sx, sy) = to_svg(Point(0.0, y));
            axes_group = axes_group.add(tick_text(format!("{y}"), sx - 0.5 * font_size, sy, "end"));
        }
        let (lx, ly) = to_svg(Point(length / 2.0, 0.0));
        let (wx, wy) = to_svg(Point(0.0, width / 2.0));
        let wx = wx - 2.5 * font_size;
        axes_group
            .add(tick_text("Length (m)".to_string(), lx, ly + 2.2 * font_size, "middle"))
            .add(
                tick_text("Width (m)".to_string(), wx, wy, "middle")
                    .set("transform", format!("rotate(-90 {wx} {wy})")),
            )
    };

    let machines_group = {
        let mut machines_group = Group::new().set("id", "machines");
        for machine in layout.machines() {
            let out_of_bounds = cost::out_of_bounds(machine, floor);
            let fill = match out_of_bounds && options.highlight_out_of_bounds {
                true => theme.highlight_fill,
                false => theme.machine_fill,
            };
            // the top-left corner in svg coordinates
            let (x, y) = to_svg(Point(machine.x, machine.y + machine.height));
            let (cx, cy) = to_svg(machine.center());
            let machine_group = Group::new()
                .set("id", format!("machine_{}", machine.name.replace(' ', "_")))
                .add(
                    Rectangle::new()
                        .set("x", x)
                        .set("y", y)
                        .set("width", machine.width)
                        .set("height", machine.height)
                        .set("fill", fill.to_string())
                        .set("stroke", theme.machine_stroke.to_string())
                        .set("stroke-width", 2.0 * stroke_width)
                        .add(Title::new(format!("{machine}"))),
                )
                .add(
                    Text::new(machine.name.clone())
                        .set("x", cx)
                        .set("y", cy)
                        .set("font-size", font_size)
                        .set("font-family", "sans-serif")
                        .set("text-anchor", "middle")
                        .set("dominant-baseline", "middle"),
                );
            machines_group = machines_group.add(machine_group);
        }
        machines_group
    };

    let flow_group = {
        let flow_color = theme.flow_stroke.to_string();
        let arrow_head = Marker::new()
            .set("id", "arrow_head")
            .set("viewBox", (0, 0, 10, 10))
            .set("refX", 10)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto-start-reverse")
            .add(svg_util::data_to_path(
                svg::node::element::path::Data::new()
                    .move_to((0.0f32, 0.0f32))
                    .line_to((10.0f32, 5.0f32))
                    .line_to((0.0f32, 10.0f32))
                    .close(),
                &[("fill", &*flow_color)],
            ));

        let mut flow_group = Group::new()
            .set("id", "flow")
            .add(Definitions::new().add(arrow_head));

        for leg in layout.flow_legs() {
            let (x1, y1) = to_svg(leg.start);
            let (x2, y2) = to_svg(leg.end);
            flow_group = flow_group.add(
                Line::new()
                    .set("x1", x1)
                    .set("y1", y1)
                    .set("x2", x2)
                    .set("y2", y2)
                    .set("stroke", flow_color.as_str())
                    .set("stroke-width", 2.0 * stroke_width)
                    .set("marker-end", "url(#arrow_head)")
                    .add(Title::new(format!(
                        "{} -> {}: {:.3} m",
                        layout.machines()[leg.from].name,
                        layout.machines()[leg.to].name,
                        leg.distance
                    ))),
            );
            if options.flow_labels {
                let (lx, ly) = to_svg(svg_util::arrow_label_position(
                    leg.start,
                    leg.end,
                    0.5 * font_size,
                ));
                flow_group = flow_group.add(
                    Text::new(format!("{:.1} m", leg.distance))
                        .set("x", lx)
                        .set("y", ly)
                        .set("font-size", 0.8 * font_size)
                        .set("font-family", "sans-serif")
                        .set("fill", flow_color.as_str())
                        .set("text-anchor", "middle")
                        .set("dominant-baseline", "middle"),
                );
            }
        }
        flow_group
    };

    let time_label = total_time.map(|t| {
        let (x, y) = to_svg(Point(1.0, width - 1.0));
        Text::new(format!("total time: {t:.2} min"))
            .set("x", x)
            .set("y", y)
            .set("font-size", 1.2 * font_size)
            .set("font-family", "sans-serif")
            .set("font-weight", "bold")
            .set("dominant-baseline", "hanging")
    });

    let mut document = Document::new()
        .set("viewBox", vbox)
        .add(label)
        .add(floor_group)
        .add(axes_group)
        .add(machines_group)
        .add(flow_group);

    if let Some(time_label) = time_label {
        document = document.add(time_label);
    }

    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Machine;

    fn layout() -> Layout {
        Layout::new(vec![
            Machine::new("Machine 1", 5.0, 5.0, 10.0, 3.0),
            Machine::new("Machine 2", 20.0, 5.0, 10.0, 3.0),
            Machine::new("Machine 3", 48.0, 5.0, 10.0, 3.0),
        ])
    }

    #[test]
    fn draws_machines_legs_and_time() {
        let layout = layout();
        let floor = Floor::new(50.0, 30.0);
        let doc = layout_to_svg(&layout, &floor, SvgDrawOptions::default(), "test", Some(42.0));
        let svg = doc.to_string();
        assert!(svg.contains("machine_Machine_1"));
        assert!(svg.contains("machine_Machine_3"));
        assert_eq!(svg.matches("marker-end").count(), 2);
        assert!(svg.contains("15.0 m"));
        assert!(svg.contains("total time: 42.00 min"));
        assert!(svg.contains("Length (m)"));
        assert!(svg.contains("Width (m)"));
        // x ticks 0..=50 and y ticks 0..=30, every 5 m
        let axes = &svg[svg.find("id=\"axes\"").unwrap()..svg.find("id=\"machines\"").unwrap()];
        assert_eq!(axes.matches("<text").count(), 11 + 7 + 2);
        // Machine 3 sticks out of the floor
        assert!(svg.contains(&SvgDrawOptions::default().theme.highlight_fill.to_string()));
    }

    #[test]
    fn rendering_does_not_alter_layout() {
        let layout = layout();
        let before = layout.clone();
        let svg = layout_to_svg(
            &layout,
            &Floor::new(50.0, 30.0),
            SvgDrawOptions::default(),
            "",
            None,
        )
        .to_string();
        assert_eq!(layout, before);
        assert!(!svg.contains("total time"));
    }
}
