// Chart axis layout for narrow and wide viewports
use serde::Serialize;

/// Viewports narrower than this get vertical axis labels.
pub const NARROW_BREAKPOINT_PX: u32 = 768;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisLayout {
    /// Label rotation in degrees.
    pub angle: i32,
    pub text_anchor: TextAnchor,
    /// Height reserved for the axis, in pixels.
    pub height: u32,
    pub dy: i32,
}

impl AxisLayout {
    pub const HORIZONTAL: AxisLayout = AxisLayout {
        angle: 0,
        text_anchor: TextAnchor::Middle,
        height: 30,
        dy: 10,
    };

    pub const VERTICAL: AxisLayout = AxisLayout {
        angle: -90,
        text_anchor: TextAnchor::End,
        height: 60,
        dy: 5,
    };

    pub fn for_narrow(narrow: bool) -> Self {
        if narrow {
            Self::VERTICAL
        } else {
            Self::HORIZONTAL
        }
    }

    pub fn for_width(width: u32) -> Self {
        Self::for_narrow(is_narrow(width))
    }

    pub fn is_vertical(&self) -> bool {
        self.angle != 0
    }
}

pub fn is_narrow(width: u32) -> bool {
    width < NARROW_BREAKPOINT_PX
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint() {
        assert_eq!(AxisLayout::for_width(767), AxisLayout::VERTICAL);
        assert_eq!(AxisLayout::for_width(768), AxisLayout::HORIZONTAL);
        assert!(AxisLayout::for_width(320).is_vertical());
        assert!(!AxisLayout::for_width(1440).is_vertical());
    }
}
