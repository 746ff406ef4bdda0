use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub node_font_size: f32,
    pub group_font_size: f32,
    pub primary_color: String,
    pub primary_text_color: String,
    pub node_border_color: String,
    pub node_border_width: f32,
    pub line_color: String,
    pub group_text_color: String,
    pub background: String,
    /// Per-channel amount added to the group colour for interface boxes.
    pub interface_lighten: u8,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "SansSerif, Arial, sans-serif".to_string(),
            node_font_size: 11.0,
            group_font_size: 14.0,
            primary_color: "#ECECFF".to_string(),
            primary_text_color: "#000000".to_string(),
            node_border_color: "#000000".to_string(),
            node_border_width: 1.0,
            line_color: "#404040".to_string(),
            group_text_color: "#000000".to_string(),
            background: "#F0F0F0".to_string(),
            interface_lighten: 40,
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            node_font_size: 12.0,
            group_font_size: 14.0,
            primary_color: "#F8FAFF".to_string(),
            primary_text_color: "#1C2430".to_string(),
            node_border_color: "#7A8AA6".to_string(),
            node_border_width: 1.2,
            line_color: "#7A8AA6".to_string(),
            group_text_color: "#1C2430".to_string(),
            background: "#FFFFFF".to_string(),
            interface_lighten: 40,
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "classic" | "default" => Some(Self::classic()),
            "modern" => Some(Self::modern()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

/// Parses `#RRGGBB`, `#RGB` or `0xRRGGBB` into channels.
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let trimmed = value.trim();
    let hex = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            let mut channels = [0u8; 3];
            for (idx, ch) in hex.chars().enumerate() {
                let v = ch.to_digit(16)? as u8;
                channels[idx] = v * 16 + v;
            }
            Some((channels[0], channels[1], channels[2]))
        }
        _ => None,
    }
}

pub fn format_hex_color((r, g, b): (u8, u8, u8)) -> String {
    format!("#{r:02X}{g:02X}{b:02X}")
}

/// Adds `amount` to every channel, saturating at 255. Colours that are not
/// hex literals are returned unchanged.
pub fn lighten(color: &str, amount: u8) -> String {
    match parse_hex_color(color) {
        Some((r, g, b)) => format_hex_color((
            r.saturating_add(amount),
            g.saturating_add(amount),
            b.saturating_add(amount),
        )),
        None => color.to_string(),
    }
}
