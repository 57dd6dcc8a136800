//! Filter definition
//!
//! A filter is a pure function from a layer (and the layers beneath it) to
//! the canvas that layer shows. Names are resolved to a variant once, when a
//! command or file is parsed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::blend::{BlendOp, Channel, Metric, ToneOp};
use crate::engine::{Canvas, Pixel};
use crate::error::CollageError;
use crate::layers::Layer;

/// Blend filter attached to a layer
///
/// Tone filters only look at the layer itself. Anchored blends compare
/// against the bottom-most layer of the stack, never the adjacent one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Filter {
    /// Identity
    #[default]
    Normal,
    /// Keep one color channel
    Channel(Channel),
    /// Brighten or darken by a metric of the pixel itself
    SelfAdjust { op: ToneOp, metric: Metric },
    /// Blend with the base (index 0) layer
    AnchoredBlend { op: BlendOp },
}

impl Filter {
    /// Every filter, in the order they are listed to users
    pub const ALL: [Filter; 13] = [
        Filter::Normal,
        Filter::Channel(Channel::Red),
        Filter::Channel(Channel::Green),
        Filter::Channel(Channel::Blue),
        Filter::SelfAdjust {
            op: ToneOp::Brighten,
            metric: Metric::Value,
        },
        Filter::SelfAdjust {
            op: ToneOp::Brighten,
            metric: Metric::Intensity,
        },
        Filter::SelfAdjust {
            op: ToneOp::Brighten,
            metric: Metric::Luma,
        },
        Filter::SelfAdjust {
            op: ToneOp::Darken,
            metric: Metric::Value,
        },
        Filter::SelfAdjust {
            op: ToneOp::Darken,
            metric: Metric::Intensity,
        },
        Filter::SelfAdjust {
            op: ToneOp::Darken,
            metric: Metric::Luma,
        },
        Filter::AnchoredBlend {
            op: BlendOp::Multiply,
        },
        Filter::AnchoredBlend { op: BlendOp::Screen },
        Filter::AnchoredBlend {
            op: BlendOp::Difference,
        },
    ];

    /// Name used on the command line and in project files
    pub fn name(&self) -> &'static str {
        use BlendOp::*;
        use Metric::*;
        use ToneOp::*;

        match self {
            Filter::Normal => "normal",
            Filter::Channel(Channel::Red) => "red",
            Filter::Channel(Channel::Green) => "green",
            Filter::Channel(Channel::Blue) => "blue",
            Filter::SelfAdjust { op: Brighten, metric: Value } => "brighten-value",
            Filter::SelfAdjust { op: Brighten, metric: Intensity } => "brighten-intensity",
            Filter::SelfAdjust { op: Brighten, metric: Luma } => "brighten-luma",
            Filter::SelfAdjust { op: Darken, metric: Value } => "darken-value",
            Filter::SelfAdjust { op: Darken, metric: Intensity } => "darken-intensity",
            Filter::SelfAdjust { op: Darken, metric: Luma } => "darken-luma",
            Filter::AnchoredBlend { op: Multiply } => "multiply",
            Filter::AnchoredBlend { op: Screen } => "screen",
            Filter::AnchoredBlend { op: Difference } => "difference",
        }
    }

    /// Compute the canvas `target` shows on top of `below`
    ///
    /// `below` holds the layers under `target`, bottom-most first; its first
    /// entry is the base for anchored blends. Anchored blends read the base's
    /// rendered canvas, everything else reads `target`'s own canvas. With no
    /// layer below, the base is treated as transparent black. Inputs are not
    /// modified.
    pub fn apply(&self, below: &[Layer], target: &Layer, max_value: u8) -> Canvas {
        let source = target.canvas();
        match *self {
            Filter::Normal => source.clone(),
            Filter::Channel(channel) => source.map(|_, _, p| channel.isolate(p)),
            Filter::SelfAdjust { op, metric } => {
                source.map(|_, _, p| op.adjust(p, metric, max_value))
            }
            Filter::AnchoredBlend { op } => {
                let base = below.first().map(Layer::rendered);
                source.map(|row, col, p| {
                    let under = base
                        .and_then(|b| b.get(row, col))
                        .unwrap_or(Pixel::TRANSPARENT);
                    op.blend(p, under, max_value)
                })
            }
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = CollageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Filter::ALL
            .iter()
            .copied()
            .find(|filter| filter.name() == s)
            .ok_or_else(|| CollageError::UnknownFilter {
                name: s.to_string(),
            })
    }
}

impl TryFrom<String> for Filter {
    type Error = CollageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Filter> for String {
    fn from(filter: Filter) -> Self {
        filter.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn layer_with(name: &str, filter: Filter, pixel: Pixel) -> Layer {
        Layer::from_canvas(name, filter, Canvas::filled(2, 2, pixel))
    }

    #[test_case("normal", Filter::Normal ; "normal")]
    #[test_case("red", Filter::Channel(Channel::Red) ; "red")]
    #[test_case(
        "brighten-luma",
        Filter::SelfAdjust { op: ToneOp::Brighten, metric: Metric::Luma }
        ; "brighten luma"
    )]
    #[test_case(
        "darken-intensity",
        Filter::SelfAdjust { op: ToneOp::Darken, metric: Metric::Intensity }
        ; "darken intensity"
    )]
    #[test_case("screen", Filter::AnchoredBlend { op: BlendOp::Screen } ; "screen")]
    fn test_parse_name(name: &str, expected: Filter) {
        assert_eq!(name.parse::<Filter>().unwrap(), expected);
        assert_eq!(expected.to_string(), name);
    }

    #[test]
    fn test_names_round_trip() {
        for filter in Filter::ALL {
            assert_eq!(filter.name().parse::<Filter>().unwrap(), filter);
        }
    }

    #[test_case("Normal" ; "capitalised")]
    #[test_case("blur" ; "unsupported")]
    #[test_case("" ; "empty")]
    fn test_unknown_name(name: &str) {
        assert!(matches!(
            name.parse::<Filter>(),
            Err(CollageError::UnknownFilter { .. })
        ));
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&Filter::AnchoredBlend { op: BlendOp::Multiply }).unwrap();
        assert_eq!(json, "\"multiply\"");
        let back: Filter = serde_json::from_str("\"darken-value\"").unwrap();
        assert_eq!(
            back,
            Filter::SelfAdjust {
                op: ToneOp::Darken,
                metric: Metric::Value
            }
        );
        assert!(serde_json::from_str::<Filter>("\"sepia\"").is_err());
    }

    #[test]
    fn test_apply_does_not_touch_inputs() {
        let base = layer_with("base", Filter::Normal, Pixel::rgb(128, 128, 128));
        let top = layer_with("top", Filter::Normal, Pixel::rgb(200, 100, 50));
        let before = top.clone();

        let out = Filter::AnchoredBlend { op: BlendOp::Multiply }.apply(
            std::slice::from_ref(&base),
            &top,
            255,
        );

        assert_eq!(out, Canvas::filled(2, 2, Pixel::rgb(100, 50, 25)));
        assert_eq!(top, before);
    }

    #[test]
    fn test_anchored_blend_uses_bottom_layer() {
        let base = layer_with("base", Filter::Normal, Pixel::rgb(100, 100, 100));
        let middle = layer_with("middle", Filter::Normal, Pixel::rgb(0, 0, 0));
        let top = layer_with("top", Filter::Normal, Pixel::rgb(30, 150, 100));

        let out = Filter::AnchoredBlend {
            op: BlendOp::Difference,
        }
        .apply(&[base, middle], &top, 255);

        assert_eq!(out.pixel(0, 0).unwrap(), Pixel::rgb(70, 50, 0));
    }

    #[test]
    fn test_anchored_blend_without_base() {
        let only = layer_with("only", Filter::Normal, Pixel::rgb(30, 150, 100));
        let multiply = Filter::AnchoredBlend {
            op: BlendOp::Multiply,
        };
        assert_eq!(
            multiply.apply(&[], &only, 255),
            Canvas::filled(2, 2, Pixel::rgb(0, 0, 0))
        );
    }

    #[test]
    fn test_tone_ignores_layers_below() {
        let base = layer_with("base", Filter::Normal, Pixel::rgb(255, 255, 255));
        let top = layer_with("top", Filter::Normal, Pixel::rgb(10, 20, 30));
        let brighten = Filter::SelfAdjust {
            op: ToneOp::Brighten,
            metric: Metric::Value,
        };
        assert_eq!(
            brighten.apply(std::slice::from_ref(&base), &top, 255),
            Canvas::filled(2, 2, Pixel::rgb(40, 50, 60))
        );
    }
}
