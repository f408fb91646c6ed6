use garmentcad_core::GeometryError;
use lyon::math::point;
use serde::{Deserialize, Serialize};

use super::{rotate_point, Bounds, Point};

/// One drawing command of a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    QuadTo {
        cx: f64,
        cy: f64,
        x: f64,
        y: f64,
    },
    CubicTo {
        c1x: f64,
        c1y: f64,
        c2x: f64,
        c2y: f64,
        x: f64,
        y: f64,
    },
    Close,
}

impl PathCommand {
    pub fn move_to(p: Point) -> Self {
        PathCommand::MoveTo { x: p.x, y: p.y }
    }

    pub fn line_to(p: Point) -> Self {
        PathCommand::LineTo { x: p.x, y: p.y }
    }

    pub fn quad_to(ctrl: Point, to: Point) -> Self {
        PathCommand::QuadTo {
            cx: ctrl.x,
            cy: ctrl.y,
            x: to.x,
            y: to.y,
        }
    }

    pub fn cubic_to(ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        PathCommand::CubicTo {
            c1x: ctrl1.x,
            c1y: ctrl1.y,
            c2x: ctrl2.x,
            c2y: ctrl2.y,
            x: to.x,
            y: to.y,
        }
    }

    /// The on-curve point this command ends at. `Close` has none.
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            PathCommand::MoveTo { x, y }
            | PathCommand::LineTo { x, y }
            | PathCommand::QuadTo { x, y, .. }
            | PathCommand::CubicTo { x, y, .. } => Some(Point::new(x, y)),
            PathCommand::Close => None,
        }
    }

    /// All coordinates of the command, control points included.
    pub fn control_points(&self) -> Vec<Point> {
        match *self {
            PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => vec![Point::new(x, y)],
            PathCommand::QuadTo { cx, cy, x, y } => vec![Point::new(cx, cy), Point::new(x, y)],
            PathCommand::CubicTo {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            } => vec![
                Point::new(c1x, c1y),
                Point::new(c2x, c2y),
                Point::new(x, y),
            ],
            PathCommand::Close => Vec::new(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.control_points().iter().all(Point::is_finite)
    }

    /// Applies `f` to every coordinate of the command.
    pub fn map_points<F>(&self, f: F) -> Self
    where
        F: Fn(Point) -> Point,
    {
        match *self {
            PathCommand::MoveTo { x, y } => PathCommand::move_to(f(Point::new(x, y))),
            PathCommand::LineTo { x, y } => PathCommand::line_to(f(Point::new(x, y))),
            PathCommand::QuadTo { cx, cy, x, y } => {
                PathCommand::quad_to(f(Point::new(cx, cy)), f(Point::new(x, y)))
            }
            PathCommand::CubicTo {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            } => PathCommand::cubic_to(
                f(Point::new(c1x, c1y)),
                f(Point::new(c2x, c2y)),
                f(Point::new(x, y)),
            ),
            PathCommand::Close => PathCommand::Close,
        }
    }

    /// Same command ending at `p`; control points are left where they are.
    pub fn with_end_point(&self, p: Point) -> Self {
        match *self {
            PathCommand::MoveTo { .. } => PathCommand::move_to(p),
            PathCommand::LineTo { .. } => PathCommand::line_to(p),
            PathCommand::QuadTo { cx, cy, .. } => PathCommand::QuadTo {
                cx,
                cy,
                x: p.x,
                y: p.y,
            },
            PathCommand::CubicTo {
                c1x, c1y, c2x, c2y, ..
            } => PathCommand::CubicTo {
                c1x,
                c1y,
                c2x,
                c2y,
                x: p.x,
                y: p.y,
            },
            PathCommand::Close => PathCommand::Close,
        }
    }
}

/// A drawable piece of a path between two consecutive on-curve points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line {
        from: Point,
        to: Point,
    },
    Quad {
        from: Point,
        ctrl: Point,
        to: Point,
    },
    Cubic {
        from: Point,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
}

impl Segment {
    pub fn from(&self) -> Point {
        match *self {
            Segment::Line { from, .. } | Segment::Quad { from, .. } | Segment::Cubic { from, .. } => {
                from
            }
        }
    }

    pub fn to(&self) -> Point {
        match *self {
            Segment::Line { to, .. } | Segment::Quad { to, .. } | Segment::Cubic { to, .. } => to,
        }
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Segment::Line { .. })
    }

    /// The same geometry traversed from `to` back to `from`.
    pub fn reversed(&self) -> Segment {
        match *self {
            Segment::Line { from, to } => Segment::Line { from: to, to: from },
            Segment::Quad { from, ctrl, to } => Segment::Quad {
                from: to,
                ctrl,
                to: from,
            },
            Segment::Cubic {
                from,
                ctrl1,
                ctrl2,
                to,
            } => Segment::Cubic {
                from: to,
                ctrl1: ctrl2,
                ctrl2: ctrl1,
                to: from,
            },
        }
    }

    /// Evaluates the segment at parameter `t` in `[0, 1]`.
    pub fn sample(&self, t: f64) -> Point {
        match *self {
            Segment::Line { from, to } => from.lerp(to, t),
            Segment::Quad { from, ctrl, to } => {
                let a = from.lerp(ctrl, t);
                let b = ctrl.lerp(to, t);
                a.lerp(b, t)
            }
            Segment::Cubic {
                from,
                ctrl1,
                ctrl2,
                to,
            } => {
                let a = from.lerp(ctrl1, t);
                let b = ctrl1.lerp(ctrl2, t);
                let c = ctrl2.lerp(to, t);
                let ab = a.lerp(b, t);
                let bc = b.lerp(c, t);
                ab.lerp(bc, t)
            }
        }
    }
}

/// An immutable, validated sequence of drawing commands.
///
/// The first command is always `MoveTo`, a `Close` can only be the last
/// command, every coordinate is finite and there are at least two on-curve
/// points. Command index `i > 0` also names the segment that ends at
/// command `i`, so segment and command indexes are interchangeable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PathCommand>", into = "Vec<PathCommand>")]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl TryFrom<Vec<PathCommand>> for Path {
    type Error = GeometryError;

    fn try_from(commands: Vec<PathCommand>) -> Result<Self, Self::Error> {
        Path::new(commands)
    }
}

impl From<Path> for Vec<PathCommand> {
    fn from(path: Path) -> Self {
        path.commands
    }
}

impl Path {
    /// Validates `commands` and wraps them in a path.
    pub fn new(commands: Vec<PathCommand>) -> Result<Self, GeometryError> {
        match commands.first() {
            None => {
                return Err(GeometryError::TooFewPoints {
                    required: 2,
                    found: 0,
                })
            }
            Some(PathCommand::MoveTo { .. }) => {}
            Some(_) => return Err(GeometryError::MissingMoveTo),
        }

        let last = commands.len() - 1;
        let mut point_count = 0;
        for (index, cmd) in commands.iter().enumerate() {
            if !cmd.is_finite() {
                return Err(GeometryError::NonFiniteCoordinate { index });
            }
            match cmd {
                PathCommand::MoveTo { .. } if index > 0 => {
                    return Err(GeometryError::MultipleSubpaths { index });
                }
                PathCommand::Close if index != last => {
                    return Err(GeometryError::CloseNotLast { index });
                }
                PathCommand::Close => {}
                _ => point_count += 1,
            }
        }

        if point_count < 2 {
            return Err(GeometryError::TooFewPoints {
                required: 2,
                found: point_count,
            });
        }

        Ok(Self { commands })
    }

    /// Straight-line path through `points`.
    pub fn from_points(points: &[Point], closed: bool) -> Result<Self, GeometryError> {
        let mut commands = Vec::with_capacity(points.len() + 1);
        for (i, p) in points.iter().enumerate() {
            if i == 0 {
                commands.push(PathCommand::move_to(*p));
            } else {
                commands.push(PathCommand::line_to(*p));
            }
        }
        if closed {
            commands.push(PathCommand::Close);
        }
        Self::new(commands)
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Always false: a valid path has at least two commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    pub fn start(&self) -> Point {
        // validated: commands[0] is MoveTo
        self.commands[0].end_point().unwrap_or_default()
    }

    /// On-curve points in command order (Close contributes nothing).
    pub fn points(&self) -> Vec<Point> {
        self.commands.iter().filter_map(|c| c.end_point()).collect()
    }

    /// On-curve point of command `index`.
    pub fn point_at(&self, index: usize) -> Option<Point> {
        self.commands.get(index).and_then(|c| c.end_point())
    }

    /// Index of the last command carrying an on-curve point.
    pub fn last_point_index(&self) -> usize {
        if self.is_closed() {
            self.commands.len() - 2
        } else {
            self.commands.len() - 1
        }
    }

    /// Segment ending at command `index`.
    ///
    /// For `Close` this is the closing line back to the start, `None` when
    /// the last point already sits on the start.
    pub fn segment(&self, index: usize) -> Option<Segment> {
        if index == 0 || index >= self.commands.len() {
            return None;
        }
        let from = self.commands[index - 1].end_point()?;
        match self.commands[index] {
            PathCommand::LineTo { x, y } => Some(Segment::Line {
                from,
                to: Point::new(x, y),
            }),
            PathCommand::QuadTo { cx, cy, x, y } => Some(Segment::Quad {
                from,
                ctrl: Point::new(cx, cy),
                to: Point::new(x, y),
            }),
            PathCommand::CubicTo {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            } => Some(Segment::Cubic {
                from,
                ctrl1: Point::new(c1x, c1y),
                ctrl2: Point::new(c2x, c2y),
                to: Point::new(x, y),
            }),
            PathCommand::Close => {
                let to = self.start();
                if from == to {
                    None
                } else {
                    Some(Segment::Line { from, to })
                }
            }
            PathCommand::MoveTo { .. } => None,
        }
    }

    /// Every segment with the command index that ends it.
    pub fn segments(&self) -> Vec<(usize, Segment)> {
        (1..self.commands.len())
            .filter_map(|i| self.segment(i).map(|s| (i, s)))
            .collect()
    }

    /// Bounds of all coordinates, control points included.
    pub fn control_bounds(&self) -> Bounds {
        let pts: Vec<Point> = self
            .commands
            .iter()
            .flat_map(|c| c.control_points())
            .collect();
        Bounds::from_points(&pts).unwrap_or(Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 0.0,
        })
    }

    /// Applies `f` to every coordinate. The caller keeps `f` finite.
    pub fn map_points<F>(&self, f: F) -> Path
    where
        F: Fn(Point) -> Point,
    {
        Path {
            commands: self.commands.iter().map(|c| c.map_points(&f)).collect(),
        }
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Path {
        self.map_points(|p| Point::new(p.x + dx, p.y + dy))
    }

    pub fn rotate_about(&self, center: Point, angle_deg: f64) -> Path {
        self.map_points(|p| rotate_point(p, center, angle_deg))
    }

    pub fn scale_about(&self, center: Point, sx: f64, sy: f64) -> Path {
        self.map_points(|p| {
            Point::new(
                center.x + (p.x - center.x) * sx,
                center.y + (p.y - center.y) * sy,
            )
        })
    }

    /// Reflects across the vertical line `x = axis_x`.
    pub fn mirror_x(&self, axis_x: f64) -> Path {
        self.map_points(|p| Point::new(2.0 * axis_x - p.x, p.y))
    }

    /// Replaces command `index`, revalidating the result.
    pub fn with_command(&self, index: usize, cmd: PathCommand) -> Result<Path, GeometryError> {
        if index >= self.commands.len() {
            return Err(GeometryError::SegmentOutOfRange {
                index,
                count: self.commands.len(),
            });
        }
        let mut commands = self.commands.clone();
        commands[index] = cmd;
        Path::new(commands)
    }

    /// Inserts `cmd` before command `index`, revalidating the result.
    pub fn with_inserted(&self, index: usize, cmd: PathCommand) -> Result<Path, GeometryError> {
        if index > self.commands.len() {
            return Err(GeometryError::SegmentOutOfRange {
                index,
                count: self.commands.len(),
            });
        }
        let mut commands = self.commands.clone();
        commands.insert(index, cmd);
        Path::new(commands)
    }

    /// SVG path data for the path.
    pub fn to_svg_data(&self) -> String {
        let parts: Vec<String> = self
            .commands
            .iter()
            .map(|cmd| match *cmd {
                PathCommand::MoveTo { x, y } => format!("M {} {}", x, y),
                PathCommand::LineTo { x, y } => format!("L {} {}", x, y),
                PathCommand::QuadTo { cx, cy, x, y } => format!("Q {} {} {} {}", cx, cy, x, y),
                PathCommand::CubicTo {
                    c1x,
                    c1y,
                    c2x,
                    c2y,
                    x,
                    y,
                } => format!("C {} {} {} {} {} {}", c1x, c1y, c2x, c2y, x, y),
                PathCommand::Close => "Z".to_string(),
            })
            .collect();
        parts.join(" ")
    }

    /// Parses SVG path data (`M L H V Q T C S Z`, absolute or relative).
    ///
    /// Arc commands are rejected, as is any data describing more than one
    /// subpath.
    pub fn from_svg_data(data: &str) -> Result<Path, GeometryError> {
        let tokens = tokenize_svg_path(data);
        let mut commands = Vec::new();
        let mut current = Point::default();
        let mut start = Point::default();
        let mut prev_cubic_ctrl: Option<Point> = None;
        let mut prev_quad_ctrl: Option<Point> = None;
        let mut i = 0;

        let invalid = |reason: String| GeometryError::InvalidSvgData { reason };

        while i < tokens.len() {
            let cmd = match &tokens[i] {
                SvgToken::Command(c) => *c,
                SvgToken::Number(n) => {
                    return Err(invalid(format!("expected a command, found number {}", n)))
                }
            };
            i += 1;
            let relative = cmd.is_ascii_lowercase();
            let base = |current: Point, p: Point| if relative { current + p } else { p };

            let upper = cmd.to_ascii_uppercase();
            let arity = match upper {
                'M' | 'L' | 'T' => 2,
                'H' | 'V' => 1,
                'Q' | 'S' => 4,
                'C' => 6,
                'Z' => 0,
                'A' => return Err(invalid("arc commands are not supported".to_string())),
                other => return Err(invalid(format!("unknown command '{}'", other))),
            };

            if arity == 0 {
                commands.push(PathCommand::Close);
                current = start;
                prev_cubic_ctrl = None;
                prev_quad_ctrl = None;
                continue;
            }

            let mut first = true;
            loop {
                let args = take_numbers(&tokens, &mut i, arity);
                let args = match args {
                    Some(args) => args,
                    None if first => {
                        return Err(invalid(format!(
                            "command '{}' needs {} numbers",
                            cmd, arity
                        )))
                    }
                    None => break,
                };

                match upper {
                    'M' => {
                        let p = base(current, Point::new(args[0], args[1]));
                        if first {
                            commands.push(PathCommand::move_to(p));
                            start = p;
                        } else {
                            commands.push(PathCommand::line_to(p));
                        }
                        current = p;
                        prev_cubic_ctrl = None;
                        prev_quad_ctrl = None;
                    }
                    'L' => {
                        current = base(current, Point::new(args[0], args[1]));
                        commands.push(PathCommand::line_to(current));
                        prev_cubic_ctrl = None;
                        prev_quad_ctrl = None;
                    }
                    'H' => {
                        let x = if relative { current.x + args[0] } else { args[0] };
                        current = Point::new(x, current.y);
                        commands.push(PathCommand::line_to(current));
                        prev_cubic_ctrl = None;
                        prev_quad_ctrl = None;
                    }
                    'V' => {
                        let y = if relative { current.y + args[0] } else { args[0] };
                        current = Point::new(current.x, y);
                        commands.push(PathCommand::line_to(current));
                        prev_cubic_ctrl = None;
                        prev_quad_ctrl = None;
                    }
                    'Q' => {
                        let ctrl = base(current, Point::new(args[0], args[1]));
                        let to = base(current, Point::new(args[2], args[3]));
                        commands.push(PathCommand::quad_to(ctrl, to));
                        prev_quad_ctrl = Some(ctrl);
                        prev_cubic_ctrl = None;
                        current = to;
                    }
                    'T' => {
                        let ctrl = match prev_quad_ctrl {
                            Some(c) => current * 2.0 - c,
                            None => current,
                        };
                        let to = base(current, Point::new(args[0], args[1]));
                        commands.push(PathCommand::quad_to(ctrl, to));
                        prev_quad_ctrl = Some(ctrl);
                        prev_cubic_ctrl = None;
                        current = to;
                    }
                    'C' => {
                        let c1 = base(current, Point::new(args[0], args[1]));
                        let c2 = base(current, Point::new(args[2], args[3]));
                        let to = base(current, Point::new(args[4], args[5]));
                        commands.push(PathCommand::cubic_to(c1, c2, to));
                        prev_cubic_ctrl = Some(c2);
                        prev_quad_ctrl = None;
                        current = to;
                    }
                    'S' => {
                        let c1 = match prev_cubic_ctrl {
                            Some(c) => current * 2.0 - c,
                            None => current,
                        };
                        let c2 = base(current, Point::new(args[0], args[1]));
                        let to = base(current, Point::new(args[2], args[3]));
                        commands.push(PathCommand::cubic_to(c1, c2, to));
                        prev_cubic_ctrl = Some(c2);
                        prev_quad_ctrl = None;
                        current = to;
                    }
                    _ => unreachable!("arity table covers every accepted command"),
                }
                first = false;
            }
        }

        Path::new(commands)
    }

    /// Converts to a lyon path for renderers (single precision).
    pub fn to_lyon_path(&self) -> lyon::path::Path {
        let to_lyon = |p: Point| point(p.x as f32, p.y as f32);
        let mut builder = lyon::path::Path::builder();
        builder.begin(to_lyon(self.start()));
        for cmd in &self.commands[1..] {
            match *cmd {
                PathCommand::LineTo { x, y } => {
                    builder.line_to(to_lyon(Point::new(x, y)));
                }
                PathCommand::QuadTo { cx, cy, x, y } => {
                    builder.quadratic_bezier_to(
                        to_lyon(Point::new(cx, cy)),
                        to_lyon(Point::new(x, y)),
                    );
                }
                PathCommand::CubicTo {
                    c1x,
                    c1y,
                    c2x,
                    c2y,
                    x,
                    y,
                } => {
                    builder.cubic_bezier_to(
                        to_lyon(Point::new(c1x, c1y)),
                        to_lyon(Point::new(c2x, c2y)),
                        to_lyon(Point::new(x, y)),
                    );
                }
                PathCommand::MoveTo { .. } | PathCommand::Close => {}
            }
        }
        builder.end(self.is_closed());
        builder.build()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum SvgToken {
    Command(char),
    Number(f64),
}

/// Reads `count` numbers at `*i`, advancing past them. `None` if a command
/// or the end of input comes first.
fn take_numbers(tokens: &[SvgToken], i: &mut usize, count: usize) -> Option<Vec<f64>> {
    let mut out = Vec::with_capacity(count);
    for k in 0..count {
        match tokens.get(*i + k) {
            Some(SvgToken::Number(n)) => out.push(*n),
            _ => return None,
        }
    }
    *i += count;
    Some(out)
}

fn tokenize_svg_path(path_data: &str) -> Vec<SvgToken> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    fn flush(current: &mut String, tokens: &mut Vec<SvgToken>) {
        if current.is_empty() {
            return;
        }
        match current.parse::<f64>() {
            Ok(n) => tokens.push(SvgToken::Number(n)),
            // unparsable numbers become NaN and fail path validation
            Err(_) => tokens.push(SvgToken::Number(f64::NAN)),
        }
        current.clear();
    }

    for ch in path_data.chars() {
        match ch {
            'M' | 'm' | 'L' | 'l' | 'H' | 'h' | 'V' | 'v' | 'C' | 'c' | 'S' | 's' | 'Q' | 'q'
            | 'T' | 't' | 'A' | 'a' | 'Z' | 'z' => {
                flush(&mut current, &mut tokens);
                tokens.push(SvgToken::Command(ch));
            }
            ' ' | ',' | '\n' | '\r' | '\t' => flush(&mut current, &mut tokens),
            '-' | '+' => {
                if !current.is_empty() && !matches!(current.chars().last(), Some('e' | 'E')) {
                    flush(&mut current, &mut tokens);
                }
                current.push(ch);
            }
            '.' if current.contains('.') && !current.contains(|c| c == 'e' || c == 'E') => {
                // "0.5.5" is two numbers
                flush(&mut current, &mut tokens);
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }
    flush(&mut current, &mut tokens);
    tokens
}

/// Incremental builder for freehand drawing.
///
/// Points are appended as lines; closing snaps to the start when the last
/// point lies within `snap_radius` of it.
#[derive(Debug, Clone)]
pub struct PathBuilder {
    commands: Vec<PathCommand>,
    snap_radius: f64,
    closed: bool,
}

impl PathBuilder {
    pub fn new(snap_radius: f64) -> Self {
        Self {
            commands: Vec::new(),
            snap_radius,
            closed: false,
        }
    }

    pub fn point_count(&self) -> usize {
        self.commands.iter().filter(|c| c.end_point().is_some()).count()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn start(&self) -> Option<Point> {
        self.commands.first().and_then(|c| c.end_point())
    }

    /// Adds a freehand point. Returns true when the point landed within the
    /// snap radius of the start and closed the path.
    pub fn draw_point(&mut self, p: Point) -> bool {
        if self.closed {
            return true;
        }
        match self.start() {
            None => {
                self.commands.push(PathCommand::move_to(p));
                false
            }
            Some(start) if self.point_count() >= 3 && start.distance_to(&p) <= self.snap_radius => {
                self.commands.push(PathCommand::Close);
                self.closed = true;
                true
            }
            Some(_) => {
                self.commands.push(PathCommand::line_to(p));
                false
            }
        }
    }

    pub fn quad_to(&mut self, ctrl: Point, to: Point) -> &mut Self {
        if !self.closed && !self.commands.is_empty() {
            self.commands.push(PathCommand::quad_to(ctrl, to));
        }
        self
    }

    pub fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) -> &mut Self {
        if !self.closed && !self.commands.is_empty() {
            self.commands.push(PathCommand::cubic_to(ctrl1, ctrl2, to));
        }
        self
    }

    /// Closes the path; a final point sitting on the start is dropped.
    pub fn close(&mut self) -> &mut Self {
        if self.closed || self.commands.is_empty() {
            return self;
        }
        let last_line = match self.commands.last() {
            Some(PathCommand::LineTo { x, y }) => Some(Point::new(*x, *y)),
            _ => None,
        };
        if let (Some(start), Some(last)) = (self.start(), last_line) {
            if self.commands.len() > 2 && start.distance_to(&last) <= self.snap_radius {
                self.commands.pop();
            }
        }
        self.commands.push(PathCommand::Close);
        self.closed = true;
        self
    }

    pub fn build(&self) -> Result<Path, GeometryError> {
        Path::new(self.commands.clone())
    }
}
