//! Tag colour canonicalisation.
//!
//! Tags store colours as CSS3 colour names. Input may be a hex triplet
//! (`#RRGGBB` or `#RGB`, any case) or a CSS3 name. Where several names share
//! a value the first one listed wins (`aqua` over `cyan`, `fuchsia` over
//! `magenta`, `gray` spellings over `grey`), whichever way it was entered.

use crate::error::CatalogError;

/// Longest stored colour name (`tags.color VARCHAR(20)`).
pub const MAX_COLOR_NAME_LEN: usize = 20;

const CSS3_COLORS: &[(&str, u32)] = &[
    ("aliceblue", 0xf0f8ff),
    ("antiquewhite", 0xfaebd7),
    ("aqua", 0x00ffff),
    ("aquamarine", 0x7fffd4),
    ("azure", 0xf0ffff),
    ("beige", 0xf5f5dc),
    ("bisque", 0xffe4c4),
    ("black", 0x000000),
    ("blanchedalmond", 0xffebcd),
    ("blue", 0x0000ff),
    ("blueviolet", 0x8a2be2),
    ("brown", 0xa52a2a),
    ("burlywood", 0xdeb887),
    ("cadetblue", 0x5f9ea0),
    ("chartreuse", 0x7fff00),
    ("chocolate", 0xd2691e),
    ("coral", 0xff7f50),
    ("cornflowerblue", 0x6495ed),
    ("cornsilk", 0xfff8dc),
    ("crimson", 0xdc143c),
    ("cyan", 0x00ffff),
    ("darkblue", 0x00008b),
    ("darkcyan", 0x008b8b),
    ("darkgoldenrod", 0xb8860b),
    ("darkgray", 0xa9a9a9),
    ("darkgrey", 0xa9a9a9),
    ("darkgreen", 0x006400),
    ("darkkhaki", 0xbdb76b),
    ("darkmagenta", 0x8b008b),
    ("darkolivegreen", 0x556b2f),
    ("darkorange", 0xff8c00),
    ("darkorchid", 0x9932cc),
    ("darkred", 0x8b0000),
    ("darksalmon", 0xe9967a),
    ("darkseagreen", 0x8fbc8f),
    ("darkslateblue", 0x483d8b),
    ("darkslategray", 0x2f4f4f),
    ("darkslategrey", 0x2f4f4f),
    ("darkturquoise", 0x00ced1),
    ("darkviolet", 0x9400d3),
    ("deeppink", 0xff1493),
    ("deepskyblue", 0x00bfff),
    ("dimgray", 0x696969),
    ("dimgrey", 0x696969),
    ("dodgerblue", 0x1e90ff),
    ("firebrick", 0xb22222),
    ("floralwhite", 0xfffaf0),
    ("forestgreen", 0x228b22),
    ("fuchsia", 0xff00ff),
    ("gainsboro", 0xdcdcdc),
    ("ghostwhite", 0xf8f8ff),
    ("gold", 0xffd700),
    ("goldenrod", 0xdaa520),
    ("gray", 0x808080),
    ("grey", 0x808080),
    ("green", 0x008000),
    ("greenyellow", 0xadff2f),
    ("honeydew", 0xf0fff0),
    ("hotpink", 0xff69b4),
    ("indianred", 0xcd5c5c),
    ("indigo", 0x4b0082),
    ("ivory", 0xfffff0),
    ("khaki", 0xf0e68c),
    ("lavender", 0xe6e6fa),
    ("lavenderblush", 0xfff0f5),
    ("lawngreen", 0x7cfc00),
    ("lemonchiffon", 0xfffacd),
    ("lightblue", 0xadd8e6),
    ("lightcoral", 0xf08080),
    ("lightcyan", 0xe0ffff),
    ("lightgoldenrodyellow", 0xfafad2),
    ("lightgray", 0xd3d3d3),
    ("lightgrey", 0xd3d3d3),
    ("lightgreen", 0x90ee90),
    ("lightpink", 0xffb6c1),
    ("lightsalmon", 0xffa07a),
    ("lightseagreen", 0x20b2aa),
    ("lightskyblue", 0x87cefa),
    ("lightslategray", 0x778899),
    ("lightslategrey", 0x778899),
    ("lightsteelblue", 0xb0c4de),
    ("lightyellow", 0xffffe0),
    ("lime", 0x00ff00),
    ("limegreen", 0x32cd32),
    ("linen", 0xfaf0e6),
    ("magenta", 0xff00ff),
    ("maroon", 0x800000),
    ("mediumaquamarine", 0x66cdaa),
    ("mediumblue", 0x0000cd),
    ("mediumorchid", 0xba55d3),
    ("mediumpurple", 0x9370db),
    ("mediumseagreen", 0x3cb371),
    ("mediumslateblue", 0x7b68ee),
    ("mediumspringgreen", 0x00fa9a),
    ("mediumturquoise", 0x48d1cc),
    ("mediumvioletred", 0xc71585),
    ("midnightblue", 0x191970),
    ("mintcream", 0xf5fffa),
    ("mistyrose", 0xffe4e1),
    ("moccasin", 0xffe4b5),
    ("navajowhite", 0xffdead),
    ("navy", 0x000080),
    ("oldlace", 0xfdf5e6),
    ("olive", 0x808000),
    ("olivedrab", 0x6b8e23),
    ("orange", 0xffa500),
    ("orangered", 0xff4500),
    ("orchid", 0xda70d6),
    ("palegoldenrod", 0xeee8aa),
    ("palegreen", 0x98fb98),
    ("paleturquoise", 0xafeeee),
    ("palevioletred", 0xdb7093),
    ("papayawhip", 0xffefd5),
    ("peachpuff", 0xffdab9),
    ("peru", 0xcd853f),
    ("pink", 0xffc0cb),
    ("plum", 0xdda0dd),
    ("powderblue", 0xb0e0e6),
    ("purple", 0x800080),
    ("red", 0xff0000),
    ("rosybrown", 0xbc8f8f),
    ("royalblue", 0x4169e1),
    ("saddlebrown", 0x8b4513),
    ("salmon", 0xfa8072),
    ("sandybrown", 0xf4a460),
    ("seagreen", 0x2e8b57),
    ("seashell", 0xfff5ee),
    ("sienna", 0xa0522d),
    ("silver", 0xc0c0c0),
    ("skyblue", 0x87ceeb),
    ("slateblue", 0x6a5acd),
    ("slategray", 0x708090),
    ("slategrey", 0x708090),
    ("snow", 0xfffafa),
    ("springgreen", 0x00ff7f),
    ("steelblue", 0x4682b4),
    ("tan", 0xd2b48c),
    ("teal", 0x008080),
    ("thistle", 0xd8bfd8),
    ("tomato", 0xff6347),
    ("turquoise", 0x40e0d0),
    ("violet", 0xee82ee),
    ("wheat", 0xf5deb3),
    ("white", 0xffffff),
    ("whitesmoke", 0xf5f5f5),
    ("yellow", 0xffff00),
    ("yellowgreen", 0x9acd32),
];

/// Parse `#RRGGBB` or `#RGB` into a 24-bit value.
fn parse_hex(input: &str) -> Option<u32> {
    let digits = input.strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        6 => u32::from_str_radix(digits, 16).ok(),
        3 => {
            let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
            u32::from_str_radix(&expanded, 16).ok()
        }
        _ => None,
    }
}

/// Convert user input into the canonical colour name stored on tags.
pub fn canonical_color(input: &str) -> Result<String, CatalogError> {
    let input = input.trim();

    if let Some(value) = parse_hex(input) {
        return name_for(value).ok_or_else(|| {
            CatalogError::validation(format!("Colour {} has no CSS3 name", input))
        });
    }

    let lowered = input.to_ascii_lowercase();
    CSS3_COLORS
        .iter()
        .find(|(name, _)| *name == lowered)
        .and_then(|(_, value)| name_for(*value))
        .ok_or_else(|| CatalogError::validation(format!("Unknown colour: {}", input)))
}

/// First listed name for a colour value.
fn name_for(value: u32) -> Option<String> {
    CSS3_COLORS
        .iter()
        .find(|(_, v)| *v == value)
        .map(|(name, _)| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_name() {
        assert_eq!(canonical_color("#2E8B57").unwrap(), "seagreen");
        assert_eq!(canonical_color("#ff0000").unwrap(), "red");
    }

    #[test]
    fn test_short_hex() {
        assert_eq!(canonical_color("#fff").unwrap(), "white");
        assert_eq!(canonical_color("#F00").unwrap(), "red");
    }

    #[test]
    fn test_shared_values_prefer_first_name() {
        assert_eq!(canonical_color("#00ffff").unwrap(), "aqua");
        assert_eq!(canonical_color("#808080").unwrap(), "gray");
    }

    #[test]
    fn test_name_passthrough() {
        assert_eq!(canonical_color("Tomato").unwrap(), "tomato");
    }

    #[test]
    fn test_alias_names_collapse_like_hex() {
        assert_eq!(canonical_color("cyan").unwrap(), canonical_color("#00ffff").unwrap());
        assert_eq!(canonical_color("Magenta").unwrap(), "fuchsia");
        assert_eq!(canonical_color("darkgrey").unwrap(), "darkgray");
    }

    #[test]
    fn test_every_name_fits_the_column() {
        for (name, value) in CSS3_COLORS {
            assert!(
                name.len() <= MAX_COLOR_NAME_LEN,
                "{} is {} chars",
                name,
                name.len()
            );
            let stored = canonical_color(&format!("#{:06x}", value)).unwrap();
            assert!(stored.len() <= MAX_COLOR_NAME_LEN);
        }
        assert_eq!(
            canonical_color("LightGoldenrodYellow").unwrap(),
            "lightgoldenrodyellow"
        );
    }

    #[test]
    fn test_unnamed_hex_is_rejected() {
        assert!(matches!(
            canonical_color("#49B64E"),
            Err(CatalogError::Validation(_))
        ));
        assert!(canonical_color("#12345").is_err());
        assert!(canonical_color("not-a-colour").is_err());
    }
}
