//! Minimal vector paths for icons and card shapes.
//!
//! Only absolute `M L H V C Q Z` path data is understood; that is all the
//! bundled icons use. Paths are fill-only: holes are drawn by winding the
//! inner contour the opposite way.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

pub const fn point(x: f32, y: f32) -> Point {
    Point { x, y }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(Point, Point),
    Quad(Point, Point, Point),
    Cubic(Point, Point, Point, Point),
}

impl Segment {
    fn map(self, f: impl Fn(Point) -> Point) -> Segment {
        match self {
            Segment::Line(a, b) => Segment::Line(f(a), f(b)),
            Segment::Quad(a, b, c) => Segment::Quad(f(a), f(b), f(c)),
            Segment::Cubic(a, b, c, d) => Segment::Cubic(f(a), f(b), f(c), f(d)),
        }
    }

    fn reversed(self) -> Segment {
        match self {
            Segment::Line(a, b) => Segment::Line(b, a),
            Segment::Quad(a, b, c) => Segment::Quad(c, b, a),
            Segment::Cubic(a, b, c, d) => Segment::Cubic(d, c, b, a),
        }
    }

    fn points(&self) -> impl Iterator<Item = Point> {
        let pts: Vec<Point> = match *self {
            Segment::Line(a, b) => vec![a, b],
            Segment::Quad(a, b, c) => vec![a, b, c],
            Segment::Cubic(a, b, c, d) => vec![a, b, c, d],
        };
        pts.into_iter()
    }
}

/// Axis-aligned bounds (control points included, so possibly loose)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathError {
    pub data: String,
    pub reason: &'static str,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bad path data ({}): {}", self.reason, self.data)
    }
}

impl std::error::Error for PathError {}

/// A set of closed contours, flattened into segments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn extend(&mut self, other: &Path) {
        self.segments.extend_from_slice(&other.segments);
    }

    /// Same outline, opposite winding
    pub fn reversed(&self) -> Path {
        Path {
            segments: self.segments.iter().map(|s| s.reversed()).collect(),
        }
    }

    /// Scale about the origin, then translate
    pub fn transformed(&self, scale: f32, dx: f32, dy: f32) -> Path {
        Path {
            segments: self
                .segments
                .iter()
                .map(|s| s.map(|p| point(p.x * scale + dx, p.y * scale + dy)))
                .collect(),
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.segments.iter().flat_map(|s| s.points());
        let first = points.next()?;
        let mut b = Bounds {
            min: first,
            max: first,
        };
        for p in points {
            b.min.x = b.min.x.min(p.x);
            b.min.y = b.min.y.min(p.y);
            b.max.x = b.max.x.max(p.x);
            b.max.y = b.max.y.max(p.y);
        }
        Some(b)
    }

    /// Clockwise circle from four cubic quarter arcs
    pub fn circle(cx: f32, cy: f32, r: f32) -> Path {
        Self::rounded_rect(cx - r, cy - r, r * 2.0, r * 2.0, r)
    }

    /// Clockwise rounded rectangle. The radius is clamped to half the shorter side.
    pub fn rounded_rect(x: f32, y: f32, w: f32, h: f32, r: f32) -> Path {
        const KAPPA: f32 = 0.552_284_8;
        let r = r.clamp(0.0, w.min(h) / 2.0);
        let k = r * KAPPA;
        let (x1, y1) = (x + w, y + h);

        let mut b = Builder::default();
        b.move_to(point(x + r, y));
        b.line_to(point(x1 - r, y));
        b.cubic_to(point(x1 - r + k, y), point(x1, y + r - k), point(x1, y + r));
        b.line_to(point(x1, y1 - r));
        b.cubic_to(point(x1, y1 - r + k), point(x1 - r + k, y1), point(x1 - r, y1));
        b.line_to(point(x + r, y1));
        b.cubic_to(point(x + r - k, y1), point(x, y1 - r + k), point(x, y1 - r));
        b.line_to(point(x, y + r));
        b.cubic_to(point(x, y + r - k), point(x + r - k, y), point(x + r, y));
        b.finish()
    }

    /// Ring between two rounded rectangles, `stroke` wide and centered on the edge
    pub fn rounded_rect_outline(x: f32, y: f32, w: f32, h: f32, r: f32, stroke: f32) -> Path {
        let half = stroke / 2.0;
        let mut outer = Self::rounded_rect(x - half, y - half, w + stroke, h + stroke, r + half);
        let inner = Self::rounded_rect(
            x + half,
            y + half,
            (w - stroke).max(0.0),
            (h - stroke).max(0.0),
            (r - half).max(0.0),
        );
        outer.extend(&inner.reversed());
        outer
    }

    /// Straight stroke with butt caps, as a filled quadrilateral
    pub fn line(x1: f32, y1: f32, x2: f32, y2: f32, width: f32) -> Path {
        let (dx, dy) = (x2 - x1, y2 - y1);
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 {
            return Path::default();
        }
        let (nx, ny) = (-dy / len * width / 2.0, dx / len * width / 2.0);

        let mut b = Builder::default();
        b.move_to(point(x1 + nx, y1 + ny));
        b.line_to(point(x2 + nx, y2 + ny));
        b.line_to(point(x2 - nx, y2 - ny));
        b.line_to(point(x1 - nx, y1 - ny));
        b.finish()
    }

    /// Parses absolute `M L H V C Q Z` path data
    pub fn parse(data: &str) -> Result<Path, PathError> {
        let fail = |reason| PathError {
            data: data.to_string(),
            reason,
        };

        let tokens = tokenize(data).ok_or_else(|| fail("malformed number"))?;
        let mut b = Builder::default();
        let mut command: Option<char> = None;
        let mut i = 0;

        let take = |i: &mut usize, n: usize| -> Result<Vec<f32>, PathError> {
            let mut out = Vec::with_capacity(n);
            for _ in 0..n {
                match tokens.get(*i) {
                    Some(Token::Number(v)) => out.push(*v),
                    _ => return Err(fail("missing argument")),
                }
                *i += 1;
            }
            Ok(out)
        };

        while i < tokens.len() {
            if let Token::Command(c) = tokens[i] {
                command = Some(c);
                i += 1;
                if c == 'Z' {
                    b.close();
                    continue;
                }
            }

            match command {
                Some('M') => {
                    let v = take(&mut i, 2)?;
                    b.move_to(point(v[0], v[1]));
                    // 後続の座標ペアは lineto 扱い
                    command = Some('L');
                }
                Some('L') => {
                    let v = take(&mut i, 2)?;
                    b.line_to(point(v[0], v[1]));
                }
                Some('H') => {
                    let v = take(&mut i, 1)?;
                    let y = b.current.y;
                    b.line_to(point(v[0], y));
                }
                Some('V') => {
                    let v = take(&mut i, 1)?;
                    let x = b.current.x;
                    b.line_to(point(x, v[0]));
                }
                Some('Q') => {
                    let v = take(&mut i, 4)?;
                    b.quad_to(point(v[0], v[1]), point(v[2], v[3]));
                }
                Some('C') => {
                    let v = take(&mut i, 6)?;
                    b.cubic_to(point(v[0], v[1]), point(v[2], v[3]), point(v[4], v[5]));
                }
                Some('Z') => return Err(fail("coordinates after closepath")),
                Some(_) => return Err(fail("unsupported command")),
                None => return Err(fail("path must start with a command")),
            }
        }

        Ok(b.finish())
    }
}

#[derive(Default)]
struct Builder {
    segments: Vec<Segment>,
    start: Option<Point>,
    current: Point,
}

impl Builder {
    fn move_to(&mut self, p: Point) {
        self.close();
        self.start = Some(p);
        self.current = p;
    }

    fn line_to(&mut self, p: Point) {
        self.begin();
        self.segments.push(Segment::Line(self.current, p));
        self.current = p;
    }

    fn quad_to(&mut self, c: Point, p: Point) {
        self.begin();
        self.segments.push(Segment::Quad(self.current, c, p));
        self.current = p;
    }

    fn cubic_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.begin();
        self.segments.push(Segment::Cubic(self.current, c1, c2, p));
        self.current = p;
    }

    fn begin(&mut self) {
        if self.start.is_none() {
            self.start = Some(self.current);
        }
    }

    /// Fill semantics: every contour is implicitly closed
    fn close(&mut self) {
        if let Some(start) = self.start.take() {
            if start != self.current {
                self.segments.push(Segment::Line(self.current, start));
            }
            self.current = start;
        }
    }

    fn finish(mut self) -> Path {
        self.close();
        Path {
            segments: self.segments,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Command(char),
    Number(f32),
}

fn tokenize(data: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = data.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() || c == ',' {
            chars.next();
        } else if c.is_ascii_alphabetic() && c != 'e' && c != 'E' {
            tokens.push(Token::Command(c));
            chars.next();
        } else {
            let mut end = start;
            let mut seen_dot = false;
            while let Some(&(idx, d)) = chars.peek() {
                let sign_ok = (d == '-' || d == '+') && idx == start;
                let dot_ok = d == '.' && !seen_dot;
                if !(d.is_ascii_digit() || sign_ok || dot_ok) {
                    break;
                }
                seen_dot |= d == '.';
                end = idx + d.len_utf8();
                chars.next();
            }
            if end == start {
                return None;
            }
            tokens.push(Token::Number(data[start..end].parse().ok()?));
        }
    }

    Some(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_supported_commands() {
        let path = Path::parse("M1 1 H5 V5 L1 5 Z M10 10 Q12 8 14 10 C15 12 13 14 10 10 Z").unwrap();
        // 4 lines (H, V, L, close) + quad + cubic (already closed)
        assert_eq!(path.segments().len(), 6);
        assert_eq!(path.segments()[0], Segment::Line(point(1.0, 1.0), point(5.0, 1.0)));
        assert_eq!(path.segments()[3], Segment::Line(point(1.0, 5.0), point(1.0, 1.0)));
    }

    #[test]
    fn implicit_lineto_after_move_and_negative_numbers() {
        let path = Path::parse("M0 0 4 0 4-4").unwrap();
        assert_eq!(
            path.segments(),
            &[
                Segment::Line(point(0.0, 0.0), point(4.0, 0.0)),
                Segment::Line(point(4.0, 0.0), point(4.0, -4.0)),
                Segment::Line(point(4.0, -4.0), point(0.0, 0.0)),
            ]
        );
    }

    #[test]
    fn rejects_relative_and_truncated_data() {
        assert!(Path::parse("m1 1 l2 2").is_err());
        assert!(Path::parse("M1").is_err());
        assert!(Path::parse("10 10").is_err());
    }

    #[test]
    fn circle_bounds_and_reversal() {
        let c = Path::circle(10.0, 10.0, 5.0);
        let b = c.bounds().unwrap();
        assert_eq!(b.min, point(5.0, 5.0));
        assert_eq!(b.max, point(15.0, 15.0));
        let r = c.reversed();
        assert_eq!(r.segments().len(), c.segments().len());

        // 角の直線は長さ 0 なので、曲線で向きを確かめる
        let (arc, back) = c
            .segments()
            .iter()
            .zip(r.segments())
            .find(|(s, _)| matches!(s, Segment::Cubic(..)))
            .expect("circle has curves");
        let (Segment::Cubic(a, _, _, d), Segment::Cubic(ra, _, _, rd)) = (arc, back) else {
            panic!("reversal changed the segment kind");
        };
        assert_ne!(a, d);
        assert_eq!((ra, rd), (d, a));
    }

    #[test]
    fn builder_starts_at_the_origin() {
        assert_eq!(Point::default(), point(0.0, 0.0));
        let p = Path::parse("M2 3 L4 3 Z").unwrap();
        assert_eq!(p.segments()[0], Segment::Line(point(2.0, 3.0), point(4.0, 3.0)));
    }

    #[test]
    fn transform_scales_then_translates() {
        let p = Path::parse("M0 0 L24 24").unwrap().transformed(0.5, 10.0, 20.0);
        assert_eq!(p.segments()[0], Segment::Line(point(10.0, 20.0), point(22.0, 32.0)));
    }

    #[test]
    fn horizontal_line_is_a_closed_band() {
        let p = Path::line(0.0, 10.0, 20.0, 10.0, 2.0);
        assert_eq!(p.segments().len(), 4);
        let b = p.bounds().unwrap();
        assert_eq!(b.min, point(0.0, 9.0));
        assert_eq!(b.max, point(20.0, 11.0));
        assert!(Path::line(3.0, 3.0, 3.0, 3.0, 1.0).is_empty());
    }
}
