use crate::format::Listing;
use owo_colors::OwoColorize;
use popmark::defaults::category_color;

pub trait Colorize {
    fn to_colored(&self) -> String;
}

/// `#RRGGBB` to an RGB triple; malformed input is grey
pub fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return (0x75, 0x75, 0x75);
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0x75);
    (channel(0), channel(2), channel(4))
}

pub struct ColorizeListing<'a, 'b>(pub &'a Listing<'b>);

impl Colorize for ColorizeListing<'_, '_> {
    fn to_colored(&self) -> String {
        let mut s = String::new();
        for record in self.0.records() {
            let (r, g, b) = hex_to_rgb(category_color(record.name));
            let marker = if record.selected { ">" } else { " " };
            let name = if record.selected {
                record.name.bold().underline().to_string()
            } else {
                record.name.bold().to_string()
            };
            s.push_str(&format!(
                "{} {} {} {}\n",
                marker.red(),
                "●".truecolor(r, g, b),
                name,
                format!("({})", record.bookmarks.len()).dimmed(),
            ));

            if record.expanded {
                for bookmark in record.bookmarks {
                    s.push_str(&format!(
                        "    {} {}\n",
                        bookmark.id.bright_blue(),
                        bookmark.title.green(),
                    ));
                    let padding = bookmark.id.len();
                    s.push_str(&format!(
                        "    {:>padding$} {}\n",
                        ">".red(),
                        bookmark.url.yellow()
                    ));
                }
            }
        }
        s
    }
}
