/// One SVG path command, decoded from its letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    /// Lowercase letter: coordinates are relative to the cursor.
    pub relative: bool,
}

/// Path command vocabulary. Every letter the grammar recognizes has a
/// variant, including the ones that are not converted to geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    MoveTo,
    LineTo,
    HorizTo,
    VertTo,
    CubicTo,
    SmoothCubicTo,
    QuadTo,
    SmoothQuadTo,
    ArcTo,
    Close,
}

impl CommandKind {
    /// Numeric tokens consumed by one instance of the command.
    pub fn arity(self) -> usize {
        match self {
            Self::MoveTo | Self::LineTo => 2,
            Self::HorizTo | Self::VertTo => 1,
            Self::CubicTo => 6,
            Self::SmoothCubicTo => 4,
            Self::QuadTo => 4,
            Self::SmoothQuadTo => 2,
            Self::ArcTo => 7,
            Self::Close => 0,
        }
    }

    /// Whether the interpreter converts this command to geometry.
    /// Quadratic and arc segments are recognized but dropped (lenient)
    /// or rejected (strict).
    pub fn is_supported(self) -> bool {
        !matches!(self, Self::QuadTo | Self::SmoothQuadTo | Self::ArcTo)
    }
}

impl Command {
    pub fn from_letter(c: char) -> Option<Self> {
        let (kind, relative) = match c {
            'M' => (CommandKind::MoveTo, false),
            'm' => (CommandKind::MoveTo, true),
            'L' => (CommandKind::LineTo, false),
            'l' => (CommandKind::LineTo, true),
            'H' => (CommandKind::HorizTo, false),
            'h' => (CommandKind::HorizTo, true),
            'V' => (CommandKind::VertTo, false),
            'v' => (CommandKind::VertTo, true),
            'C' => (CommandKind::CubicTo, false),
            'c' => (CommandKind::CubicTo, true),
            'S' => (CommandKind::SmoothCubicTo, false),
            's' => (CommandKind::SmoothCubicTo, true),
            'Q' => (CommandKind::QuadTo, false),
            'q' => (CommandKind::QuadTo, true),
            'T' => (CommandKind::SmoothQuadTo, false),
            't' => (CommandKind::SmoothQuadTo, true),
            'A' => (CommandKind::ArcTo, false),
            'a' => (CommandKind::ArcTo, true),
            'Z' => (CommandKind::Close, false),
            'z' => (CommandKind::Close, true),
            _ => return None,
        };
        Some(Self { kind, relative })
    }

    /// Whether the command letter is part of the path grammar.
    pub fn is_letter(c: char) -> bool {
        Self::from_letter(c).is_some()
    }
}
