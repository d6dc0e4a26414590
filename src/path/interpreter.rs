use kurbo::{Point, Vec2};

use crate::foundation::error::{ConvertError, ConvertResult};
use crate::path::ParseMode;
use crate::path::command::{Command, CommandKind};
use crate::path::lexer::{Span, Token, TokenKind};

/// Tolerance for merging an explicit closing vertex into the subpath
/// start, absolute on both axes.
const CLOSE_MERGE_EPS: f64 = 0.001;

/// One contiguous contour: anchor vertices plus per-vertex bezier
/// handles, each handle stored relative to its own vertex
/// (`control_point - vertex`).
///
/// The three vectors always have equal length; tangent slots hold the
/// zero vector until a curve command sets them.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Subpath {
    pub vertices: Vec<Point>,
    pub in_tangents: Vec<Vec2>,
    pub out_tangents: Vec<Vec2>,
    pub closed: bool,
}

impl Subpath {
    fn starting_at(p: Point) -> Self {
        Self {
            vertices: vec![p],
            in_tangents: vec![Vec2::ZERO],
            out_tangents: vec![Vec2::ZERO],
            closed: false,
        }
    }

    fn push_vertex(&mut self, p: Point) {
        self.vertices.push(p);
        self.in_tangents.push(Vec2::ZERO);
        self.out_tangents.push(Vec2::ZERO);
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Interpret a token sequence into subpaths.
///
/// Single left-to-right pass. Each command consumes numeric tokens per
/// its arity and repeats while enough remain (SVG implicit repetition;
/// extra pairs after a move are implicit line-tos). In lenient mode
/// truncated argument lists end the command, stray numerics and
/// unsupported commands are dropped, and drawing before the first move
/// is a no-op; in strict mode each of these is an error.
pub fn interpret(tokens: &[Token], mode: ParseMode) -> ConvertResult<Vec<Subpath>> {
    let mut state = Interpreter {
        x: 0.0,
        y: 0.0,
        subpaths: Vec::new(),
        current: None,
        mode,
    };

    let mut i = 0usize;
    while i < tokens.len() {
        match tokens[i].kind {
            TokenKind::Command(letter) => {
                let span = tokens[i].span;
                i += 1;
                // The lexer only emits letters of the grammar.
                let Some(cmd) = Command::from_letter(letter) else {
                    continue;
                };
                if !cmd.kind.is_supported() {
                    if mode == ParseMode::Strict {
                        return Err(ConvertError::unsupported(letter, span.start));
                    }
                    // Lenient: the command is dropped and its arguments
                    // fall through to the stray-number arm below.
                    continue;
                }
                i = state.run_command(cmd, tokens, i, span)?;
            }
            TokenKind::Number(_) => {
                // Numeric token with no active command (arguments of a
                // dropped command, or trailing excess).
                if mode == ParseMode::Strict {
                    return Err(ConvertError::malformed(
                        tokens[i].span.start,
                        "number without a command",
                    ));
                }
                i += 1;
            }
        }
    }

    Ok(state.subpaths)
}

struct Interpreter {
    x: f64,
    y: f64,
    subpaths: Vec<Subpath>,
    current: Option<usize>,
    mode: ParseMode,
}

impl Interpreter {
    /// Apply one command, repeating while enough numeric tokens follow.
    /// Returns the token index after everything consumed.
    fn run_command(
        &mut self,
        cmd: Command,
        tokens: &[Token],
        mut i: usize,
        span: Span,
    ) -> ConvertResult<usize> {
        let mut kind = cmd.kind;
        let mut first = true;

        loop {
            let arity = kind.arity();
            let avail = leading_numbers(tokens, i, arity);
            if avail < arity {
                // A missing first group or a partial repetition group is
                // a truncated argument list; a clean end of repetition
                // (no numbers left) is not.
                if self.mode == ParseMode::Strict && (first || avail > 0) {
                    return Err(ConvertError::malformed(
                        span.start,
                        "truncated argument list",
                    ));
                }
                // Lenient: leftover partial arguments stay behind and
                // are skipped as stray numbers by the dispatch loop.
                break;
            }

            let mut args = [0.0f64; 7];
            for (k, slot) in args[..arity].iter_mut().enumerate() {
                *slot = number_at(tokens, i + k);
            }
            i += arity;

            self.apply(kind, cmd.relative, &args[..arity], span)?;
            first = false;

            if kind == CommandKind::Close {
                break;
            }
            // Extra coordinate pairs after a move are implicit line-tos
            // into the same subpath.
            if kind == CommandKind::MoveTo {
                kind = CommandKind::LineTo;
            }
            if !matches!(
                tokens.get(i),
                Some(Token {
                    kind: TokenKind::Number(_),
                    ..
                })
            ) {
                break;
            }
        }

        Ok(i)
    }

    fn apply(
        &mut self,
        kind: CommandKind,
        relative: bool,
        args: &[f64],
        span: Span,
    ) -> ConvertResult<()> {
        match kind {
            CommandKind::MoveTo => {
                let p = self.resolve(args[0], args[1], relative);
                self.subpaths.push(Subpath::starting_at(p));
                self.current = Some(self.subpaths.len() - 1);
                self.x = p.x;
                self.y = p.y;
            }
            CommandKind::LineTo => {
                let p = self.resolve(args[0], args[1], relative);
                self.line_to(p, span)?;
            }
            CommandKind::HorizTo => {
                let x = if relative { self.x + args[0] } else { args[0] };
                let p = Point::new(x, self.y);
                self.line_to(p, span)?;
            }
            CommandKind::VertTo => {
                let y = if relative { self.y + args[0] } else { args[0] };
                let p = Point::new(self.x, y);
                self.line_to(p, span)?;
            }
            CommandKind::CubicTo => {
                let cp1 = self.resolve(args[0], args[1], relative);
                let cp2 = self.resolve(args[2], args[3], relative);
                let end = self.resolve(args[4], args[5], relative);
                self.cubic_to(cp1, cp2, end, span)?;
            }
            CommandKind::SmoothCubicTo => {
                let cp2 = self.resolve(args[0], args[1], relative);
                let end = self.resolve(args[2], args[3], relative);
                let Some(idx) = self.require_subpath(span)? else {
                    return Ok(());
                };
                // The first control point is the stored incoming handle
                // reflected about the current vertex. A straight
                // predecessor has a zero handle, so the reflection
                // degenerates to the vertex itself.
                let sp = &self.subpaths[idx];
                let last = sp.vertices.len() - 1;
                let cp1 = sp.vertices[last] - sp.in_tangents[last];
                self.cubic_to(cp1, cp2, end, span)?;
            }
            CommandKind::Close => {
                let Some(idx) = self.require_subpath(span)? else {
                    return Ok(());
                };
                self.close(idx);
            }
            // Never reaches apply: the dispatch loop drops or rejects
            // unconvertible commands per ParseMode.
            CommandKind::QuadTo | CommandKind::SmoothQuadTo | CommandKind::ArcTo => {}
        }
        Ok(())
    }

    fn resolve(&self, x: f64, y: f64, relative: bool) -> Point {
        if relative {
            Point::new(self.x + x, self.y + y)
        } else {
            Point::new(x, y)
        }
    }

    /// Current subpath index, or an error (strict) / `None` (lenient)
    /// when a drawing command precedes the first move.
    fn require_subpath(&self, span: Span) -> ConvertResult<Option<usize>> {
        match self.current {
            Some(idx) => Ok(Some(idx)),
            None if self.mode == ParseMode::Strict => Err(ConvertError::malformed(
                span.start,
                "drawing command before initial move",
            )),
            None => Ok(None),
        }
    }

    fn line_to(&mut self, p: Point, span: Span) -> ConvertResult<()> {
        let Some(idx) = self.require_subpath(span)? else {
            return Ok(());
        };
        let sp = &mut self.subpaths[idx];
        let prev = sp.vertices.len() - 1;
        // A straight segment carries no handles on either side.
        sp.out_tangents[prev] = Vec2::ZERO;
        sp.push_vertex(p);
        self.x = p.x;
        self.y = p.y;
        Ok(())
    }

    fn cubic_to(&mut self, cp1: Point, cp2: Point, end: Point, span: Span) -> ConvertResult<()> {
        let Some(idx) = self.require_subpath(span)? else {
            return Ok(());
        };
        let sp = &mut self.subpaths[idx];
        let prev = sp.vertices.len() - 1;
        sp.out_tangents[prev] = cp1 - sp.vertices[prev];
        sp.push_vertex(end);
        let new = sp.vertices.len() - 1;
        sp.in_tangents[new] = cp2 - end;
        self.x = end.x;
        self.y = end.y;
        Ok(())
    }

    fn close(&mut self, idx: usize) {
        let sp = &mut self.subpaths[idx];
        sp.closed = true;

        let last = sp.vertices.len() - 1;
        if last > 0 {
            let first = sp.vertices[0];
            let end = sp.vertices[last];
            if (first.x - end.x).abs() <= CLOSE_MERGE_EPS
                && (first.y - end.y).abs() <= CLOSE_MERGE_EPS
            {
                // The explicit closing vertex duplicates the start:
                // fold its incoming handle into vertex 0 and drop it.
                sp.in_tangents[0] = sp.in_tangents[last];
                sp.vertices.pop();
                sp.in_tangents.pop();
                sp.out_tangents.pop();
            }
        }

        self.x = sp.vertices[0].x;
        self.y = sp.vertices[0].y;
    }
}

fn leading_numbers(tokens: &[Token], from: usize, want: usize) -> usize {
    (0..want)
        .take_while(|k| {
            matches!(
                tokens.get(from + k),
                Some(Token {
                    kind: TokenKind::Number(_),
                    ..
                })
            )
        })
        .count()
}

fn number_at(tokens: &[Token], idx: usize) -> f64 {
    match tokens[idx].kind {
        TokenKind::Number(v) => v,
        TokenKind::Command(_) => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::lexer::lex;

    fn parse(d: &str) -> Vec<Subpath> {
        interpret(&lex(d, ParseMode::Lenient).unwrap(), ParseMode::Lenient).unwrap()
    }

    fn parse_strict(d: &str) -> ConvertResult<Vec<Subpath>> {
        interpret(&lex(d, ParseMode::Strict)?, ParseMode::Strict)
    }

    fn zero(v: &[Vec2]) -> bool {
        v.iter().all(|t| *t == Vec2::ZERO)
    }

    #[test]
    fn straight_polygon_has_zero_tangents() {
        let sps = parse("M0 0 L10 0 L10 10 H0 V5 l2 2");
        assert_eq!(sps.len(), 1);
        let sp = &sps[0];
        assert_eq!(sp.vertices.len(), 6);
        assert!(zero(&sp.in_tangents));
        assert!(zero(&sp.out_tangents));
        assert!(!sp.closed);
        assert_eq!(sp.vertices[3], Point::new(0.0, 10.0));
        assert_eq!(sp.vertices[4], Point::new(0.0, 5.0));
        assert_eq!(sp.vertices[5], Point::new(2.0, 7.0));
    }

    #[test]
    fn parallel_arrays_stay_in_lockstep() {
        let sps = parse("M0 0 C10 0 10 10 0 10 S-10 20 0 20 L5 5 Z");
        for sp in &sps {
            assert_eq!(sp.vertices.len(), sp.in_tangents.len());
            assert_eq!(sp.vertices.len(), sp.out_tangents.len());
        }
    }

    #[test]
    fn cubic_sets_handles_relative_to_vertices() {
        let sps = parse("M0 0 C10 0 10 10 0 10");
        assert_eq!(sps.len(), 1);
        let sp = &sps[0];
        assert_eq!(sp.vertices.len(), 2);
        assert_eq!(sp.out_tangents[0], Vec2::new(10.0, 0.0));
        assert_eq!(sp.in_tangents[1], Vec2::new(10.0, 0.0));
        assert_eq!(sp.out_tangents[1], Vec2::ZERO);
    }

    #[test]
    fn relative_cubic_resolves_against_cursor() {
        let abs = parse("M5 5 C15 5 15 15 5 15");
        let rel = parse("M5 5 c10 0 10 10 0 10");
        assert_eq!(abs, rel);
    }

    #[test]
    fn smooth_cubic_reflects_incoming_handle() {
        let sps = parse("M0 0 C10 0 10 10 20 10 S30 0 40 10");
        let sp = &sps[0];
        assert_eq!(sp.vertices.len(), 3);

        // After the C: vertex 1 sits at (20,10) with in-tangent
        // (10,10)-(20,10) = (-10,0). The S control point is its mirror
        // (30,10), so vertex 1's out-tangent is (10,0).
        assert_eq!(sp.in_tangents[1], Vec2::new(-10.0, 0.0));
        assert_eq!(sp.out_tangents[1], Vec2::new(10.0, 0.0));
        assert_eq!(sp.vertices[2], Point::new(40.0, 10.0));
        assert_eq!(sp.in_tangents[2], Vec2::new(-10.0, -10.0));
    }

    #[test]
    fn smooth_after_line_degenerates_to_current_point() {
        let sps = parse("M0 0 L10 0 S20 10 30 0");
        let sp = &sps[0];
        // No incoming curve handle to reflect: cp1 == current vertex.
        assert_eq!(sp.out_tangents[1], Vec2::ZERO);
        assert_eq!(sp.in_tangents[2], Vec2::new(-10.0, 10.0));
    }

    #[test]
    fn close_merges_coincident_end_vertex() {
        let sps = parse("M0 0 L10 0 L10 10 L0 0 Z");
        assert_eq!(sps.len(), 1);
        let sp = &sps[0];
        assert_eq!(sp.vertices.len(), 3);
        assert!(sp.closed);
        assert!(zero(&sp.in_tangents));
        assert!(zero(&sp.out_tangents));
    }

    #[test]
    fn close_merge_folds_incoming_handle_into_start() {
        // The closing cubic lands exactly on the start; its incoming
        // handle must survive on vertex 0.
        let sps = parse("M0 0 L10 0 C10 10 5 10 0 0 Z");
        let sp = &sps[0];
        assert_eq!(sp.vertices.len(), 2);
        assert!(sp.closed);
        assert_eq!(sp.in_tangents[0], Vec2::new(5.0, 10.0));
    }

    #[test]
    fn close_without_coincidence_keeps_all_vertices() {
        let sps = parse("M0 0 L10 0 L10 10 Z");
        let sp = &sps[0];
        assert_eq!(sp.vertices.len(), 3);
        assert!(sp.closed);
    }

    #[test]
    fn close_resets_cursor_to_subpath_start() {
        // The l after Z is relative to the subpath start, not to the
        // last appended vertex.
        let sps = parse("M10 10 L20 10 L20 20 Z l5 0");
        let sp = &sps[0];
        assert_eq!(sp.vertices.last(), Some(&Point::new(15.0, 10.0)));
    }

    #[test]
    fn move_starts_new_subpath_each_time() {
        let sps = parse("M0 0 L1 0 M10 10 L11 10 m5 5 l1 0");
        assert_eq!(sps.len(), 3);
        assert_eq!(sps[1].vertices[0], Point::new(10.0, 10.0));
        // Relative move resolves against the previous subpath's end.
        assert_eq!(sps[2].vertices[0], Point::new(16.0, 15.0));
    }

    #[test]
    fn extra_move_pairs_are_implicit_line_tos() {
        let sps = parse("M0 0 10 0 10 10");
        assert_eq!(sps.len(), 1);
        assert_eq!(sps[0].vertices.len(), 3);
        assert!(zero(&sps[0].in_tangents));

        let rel = parse("m1 1 1 0 0 1");
        assert_eq!(rel.len(), 1);
        assert_eq!(
            rel[0].vertices,
            vec![
                Point::new(1.0, 1.0),
                Point::new(2.0, 1.0),
                Point::new(2.0, 2.0)
            ]
        );
    }

    #[test]
    fn command_repetition_consumes_full_groups() {
        let sps = parse("M0 0 L1 0 2 0 3 0 H4 5 6");
        assert_eq!(sps[0].vertices.len(), 7);
        assert_eq!(sps[0].vertices.last(), Some(&Point::new(6.0, 0.0)));
    }

    #[test]
    fn unsupported_quadratic_is_dropped_with_its_arguments() {
        // Q contributes nothing; its four arguments are skipped one at a
        // time. Only the move and the line survive.
        let sps = parse("M0 0 Q5 5 10 0 L20 0");
        assert_eq!(sps.len(), 1);
        let sp = &sps[0];
        assert_eq!(sp.vertices.len(), 2);
        assert_eq!(sp.vertices[1], Point::new(20.0, 0.0));
    }

    #[test]
    fn unsupported_arc_is_dropped_with_its_arguments() {
        let sps = parse("M0 0 A5 5 0 0 1 10 10 L1 1");
        assert_eq!(sps[0].vertices.len(), 2);
        assert_eq!(sps[0].vertices[1], Point::new(1.0, 1.0));
    }

    #[test]
    fn lenient_truncated_arguments_end_the_command() {
        // The dangling "5" cannot complete another pair and is dropped.
        let sps = parse("M0 0 L10 0 5");
        assert_eq!(sps[0].vertices.len(), 2);
    }

    #[test]
    fn lenient_drawing_before_move_is_ignored() {
        let sps = parse("L10 10 M0 0 L1 0");
        assert_eq!(sps.len(), 1);
        assert_eq!(sps[0].vertices[0], Point::new(0.0, 0.0));
        assert_eq!(sps[0].vertices.len(), 2);
    }

    #[test]
    fn strict_rejects_unsupported_command() {
        let err = parse_strict("M0 0 Q5 5 10 0").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported path command 'Q' at byte 5"
        );
    }

    #[test]
    fn strict_rejects_truncated_arguments() {
        let err = parse_strict("M0 0 C10 0 10").unwrap_err();
        assert!(err.to_string().contains("truncated argument list"));
    }

    #[test]
    fn strict_rejects_stray_numbers() {
        assert!(parse_strict("M0 0 Z 5").is_err());
        assert!(parse_strict("M0 0 L1 0 2").is_err());
    }

    #[test]
    fn strict_rejects_drawing_before_move() {
        let err = parse_strict("L10 10").unwrap_err();
        assert!(
            err.to_string()
                .contains("drawing command before initial move")
        );
    }

    #[test]
    fn strict_accepts_well_formed_path() {
        let sps = parse_strict("M0 0 C10 0 10 10 0 10 Z").unwrap();
        assert_eq!(sps.len(), 1);
        assert!(sps[0].closed);
    }

    #[test]
    fn empty_token_stream_yields_no_subpaths() {
        assert!(parse("").is_empty());
        assert!(parse("  ,, ").is_empty());
    }
}
