use std::collections::HashMap;
use std::io;
use std::path::Path as FsPath;

use chrono::{Datelike, NaiveDate};
use svg::{
    node::{
        element::{path::Data, Circle, Group, Line, Path, Rectangle, Text},
        Text as TextNode,
    },
    Document,
};

use pennies::util::{
    array,
    coin::{self, Shape},
    group::{self, Groups},
    row::{CoinKey, Row},
};

/// Cumulative number of finds of every person over one year
pub struct Plotter<'d> {
    rows: &'d [Row],
    year: i32,
}

impl<'d> Plotter<'d> {
    pub fn from(rows: &'d [Row], year: i32) -> Self {
        Self { rows, year }
    }

    pub fn save_cumulative_plot<P: AsRef<FsPath>>(&self, file: P) -> io::Result<()> {
        svg::save(file, &self.cumulative_plot().render())
    }

    fn cumulative_plot(&self) -> Plot {
        let mut plot = Plot::new(days_in_year(self.year));
        for (person, rows) in group::by_person(self.rows) {
            let mut by_day = Groups::by(
                rows.into_iter().filter(|r| r.year() == self.year),
                |r: &&Row| r.day().ordinal0() as i64,
            );
            if by_day.is_empty() {
                continue;
            }
            by_day.sort_by(|(a, _), (b, _)| a.cmp(b));
            let mut total = 0;
            let points = by_day
                .into_iter()
                .map(|(day, rows)| {
                    total += rows.len() as i64;
                    (day, total)
                })
                .collect::<Vec<_>>();
            plot.push(person, points);
        }
        plot
    }
}

fn days_in_year(year: i32) -> i64 {
    NaiveDate::from_ymd_opt(year, 12, 31)
        .map(|d| d.ordinal() as i64)
        .unwrap_or(365)
}

/// Step lines, one per person: `(day of year, cumulative count)`
#[derive(Debug)]
struct Plot {
    days: i64,
    series: Vec<(String, Vec<(i64, i64)>)>,
}

impl Plot {
    fn new(days: i64) -> Self {
        Self {
            days,
            series: Vec::new(),
        }
    }

    fn push(&mut self, label: &str, points: Vec<(i64, i64)>) {
        self.series.push((label.to_string(), points));
    }

    fn render(&self) -> Document {
        let ymax = self
            .series
            .iter()
            .filter_map(|(_, points)| array::last(points))
            .map(|(_, y)| *y)
            .max()
            .unwrap_or(0)
            .max(1);
        let fheight = 500.0;
        let fwidth = 1000.0;
        let stroke_width = 2.0;
        let margin = 20.0;
        let label_space = 80.0;
        let resize_x = |x: i64| x as f64 / self.days as f64 * fwidth;
        let resize_y = |y: i64| (ymax - y) as f64 / ymax as f64 * fheight;

        let mut document = Document::new();
        for (i, (label, points)) in self.series.iter().enumerate() {
            let color = COLORS[i % COLORS.len()];
            let mut data = Data::new().move_to((resize_x(0), resize_y(0)));
            let mut prev = 0;
            for (day, total) in points {
                data = data
                    .line_to((resize_x(*day), resize_y(prev)))
                    .line_to((resize_x(*day), resize_y(*total)));
                prev = *total;
            }
            data = data.line_to((fwidth, resize_y(prev)));
            document = document
                .add(
                    Path::new()
                        .set("fill", "none")
                        .set("stroke", color)
                        .set("stroke-width", stroke_width)
                        .set("d", data),
                )
                .add(
                    Text::new()
                        .set("x", fwidth + 5.0)
                        .set("y", resize_y(prev))
                        .set("fill", color)
                        .set("font-size", 12)
                        .add(TextNode::new(format!("{} ({})", label, prev))),
                );
        }
        let yaxis = Line::new()
            .set("x1", 0.0)
            .set("x2", 0.0)
            .set("y1", 0.0)
            .set("y2", fheight)
            .set("stroke", "black")
            .set("stroke-width", stroke_width);
        let xaxis = Line::new()
            .set("x1", 0.0)
            .set("x2", fwidth)
            .set("y1", fheight)
            .set("y2", fheight)
            .set("stroke", "black")
            .set("stroke-width", stroke_width);
        document.add(yaxis).add(xaxis).set(
            "viewBox",
            (
                -margin,
                -margin,
                fwidth + label_space + 2.0 * margin,
                fheight + 2.0 * margin,
            ),
        )
    }
}

const COLORS: &[&str] = &[
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#a65628", "#f781bf", "#999999",
];

/// Pixels per inch of coin diameter (used as radius, coins are drawn twice their size)
const ITEM_SIZE: f64 = 24.0;
const CELL_WIDTH: f64 = 110.0;
const CELL_HEIGHT: f64 = 100.0;
const PER_LINE: usize = 6;

/// Polygon outlines, computed once per `(sides, radius)`
#[derive(Default)]
struct PathCache {
    paths: HashMap<(u8, u64), String>,
}

impl PathCache {
    fn polygon(&mut self, sides: u8, radius: f64) -> String {
        self.paths
            .entry((sides, radius.to_bits()))
            .or_insert_with(|| polygon_path(sides, radius))
            .clone()
    }
}

/// Regular polygon centered on the origin, first vertex at the top
fn polygon_path(sides: u8, radius: f64) -> String {
    let angle = 2.0 * std::f64::consts::PI / sides as f64;
    let offset = std::f64::consts::FRAC_PI_2;
    let mut path = String::new();
    for i in 0..sides {
        let theta = offset - i as f64 * angle;
        let (x, y) = (radius * theta.cos(), -radius * theta.sin());
        let cmd = if i == 0 { 'M' } else { 'L' };
        path.push_str(&format!("{}{:.3},{:.3}", cmd, x, y));
    }
    path.push('Z');
    path
}

fn circle(r: f64, fill: &str) -> Circle {
    Circle::new()
        .set("cx", 0)
        .set("cy", 0)
        .set("r", r)
        .set("fill", fill)
}

/// Icon of a denomination centered on the origin
fn icon(shape: &Shape, cache: &mut PathCache) -> Group {
    let group = Group::new();
    match *shape {
        Shape::Round { diameter, color } => group.add(circle(ITEM_SIZE * diameter, color)),
        Shape::TwoColor {
            diameter,
            inner,
            outer,
        } => group
            .add(circle(ITEM_SIZE * diameter, outer))
            .add(circle(0.75 * ITEM_SIZE * diameter, inner)),
        Shape::Holed {
            diameter,
            inner_diameter,
            color,
        } => group
            .add(circle(ITEM_SIZE * diameter, color))
            .add(circle(ITEM_SIZE * inner_diameter, "white")),
        Shape::Polygon {
            diameter,
            sides,
            color,
        } => group.add(
            Path::new()
                .set("fill", color)
                .set("d", cache.polygon(sides, ITEM_SIZE * diameter)),
        ),
        Shape::Bill { ratio, color } => {
            let height = 0.6 * ITEM_SIZE;
            group.add(
                Rectangle::new()
                    .set("x", -0.5 * ratio * height)
                    .set("y", -0.5 * height)
                    .set("width", ratio * height)
                    .set("height", height)
                    .set("fill", color),
            )
        }
    }
}

/// How many of each denomination were found in one year
pub struct CoinChart {
    coins: Vec<(CoinKey, usize)>,
}

impl CoinChart {
    pub fn from(rows: &[Row], year: i32) -> Self {
        let mut coins = group::by_coin(rows)
            .into_iter()
            .map(|(key, rows)| (key, rows.iter().filter(|r| r.year() == year).count()))
            .filter(|(_, n)| *n > 0)
            .collect::<Vec<_>>();
        coins.sort_by(|(ka, na), (kb, nb)| nb.cmp(na).then_with(|| ka.cmp(kb)));
        Self { coins }
    }

    pub fn save<P: AsRef<FsPath>>(&self, file: P) -> io::Result<()> {
        svg::save(file, &self.render())
    }

    fn render(&self) -> Document {
        let mut cache = PathCache::default();
        let lines = array::slices(PER_LINE, &self.coins);
        let mut document = Document::new();
        for (j, line) in lines.iter().enumerate() {
            for (i, (key, count)) in line.iter().enumerate() {
                let metadata = coin::lookup(key);
                let cell = Group::new()
                    .set(
                        "transform",
                        format!("translate({},{})", i as f64 * CELL_WIDTH, j as f64 * CELL_HEIGHT),
                    )
                    .add(
                        icon(&metadata.shape, &mut cache)
                            .set("transform", format!("translate({},{})", CELL_WIDTH / 2.0, 40.0)),
                    )
                    .add(
                        Text::new()
                            .set("x", CELL_WIDTH / 2.0)
                            .set("y", 85.0)
                            .set("text-anchor", "middle")
                            .set("font-size", 12)
                            .add(TextNode::new(format!("{} × {}", metadata.label(), count))),
                    );
                document = document.add(cell);
            }
        }
        let width = CELL_WIDTH * PER_LINE.min(self.coins.len()).max(1) as f64;
        let height = CELL_HEIGHT * lines.len().max(1) as f64;
        document.set("viewBox", (0.0, 0.0, width, height))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn row(person: &str, m: u32, d: u32, denomination: f64, currency: &str) -> Row {
        Row::new(Utc.with_ymd_and_hms(2024, m, d, 10, 0, 0).unwrap(), person, denomination, currency)
    }

    #[test]
    fn cumulative_series() {
        let rows = vec![
            row("Zach", 1, 1, 0.01, "USD"),
            row("Zach", 1, 3, 0.01, "USD"),
            row("Zach", 1, 1, 0.01, "USD"),
            row("Mom", 2, 1, 0.01, "USD"),
        ];
        let plot = Plotter::from(&rows, 2024).cumulative_plot();
        assert_eq!(plot.days, 366);
        assert_eq!(plot.series[0], ("Zach".to_string(), vec![(0, 2), (2, 3)]));
        assert_eq!(plot.series[1], ("Mom".to_string(), vec![(31, 1)]));
        assert!(Plotter::from(&rows, 2023).cumulative_plot().series.is_empty());
    }

    #[test]
    fn polygons() {
        let path = polygon_path(4, 1.0);
        assert!(path.starts_with("M0.000,-1.000"));
        assert!(path.ends_with('Z'));
        assert_eq!(path.matches('L').count(), 3);

        let mut cache = PathCache::default();
        let first = cache.polygon(7, 10.0);
        assert_eq!(cache.polygon(7, 10.0), first);
        assert_eq!(cache.paths.len(), 1);
        cache.polygon(11, 10.0);
        assert_eq!(cache.paths.len(), 2);
    }

    #[test]
    fn coin_counts() {
        let rows = vec![
            row("Zach", 1, 1, 0.01, "USD"),
            row("Mom", 1, 2, 1.0, "CAD"),
            row("Mom", 1, 3, 1.0, "CAD"),
        ];
        let chart = CoinChart::from(&rows, 2024);
        assert_eq!(
            chart.coins,
            vec![(CoinKey::new(1.0, "CAD"), 2), (CoinKey::new(0.01, "USD"), 1)]
        );
        assert!(CoinChart::from(&rows, 2023).coins.is_empty());
    }
}
