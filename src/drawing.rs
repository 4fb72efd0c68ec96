extern crate image;
extern crate imageproc;
extern crate rusttype;
extern crate std;

use crate::structs;

pub const MAX_ROWS: usize = 2;

const LABEL_X: i32 = 3;
const RIGHT_MARGIN: i32 = 3;
const ROW_TOP: i32 = 1;
const PLACEHOLDER_LINE_PITCH: i32 = 14;

pub struct Styles<'a> {
    pub font: rusttype::Font<'a>,
    pub text_height: f32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

/// A single run of text; `x` is the left edge for `Align::Left` and the
/// right edge for `Align::Right`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub color: structs::Rgb,
    pub x: i32,
    pub y: i32,
    pub align: Align,
}

pub fn arrival_items(arrivals: &[structs::ArrivalRecord], width: u32, height: u32) -> Vec<TextItem> {
    let row_height = (height / MAX_ROWS as u32) as i32;
    let mut items = vec![];
    for (i, arrival) in arrivals.iter().take(MAX_ROWS).enumerate() {
        let y = ROW_TOP + row_height * i as i32;
        items.push(TextItem {
            text: arrival.line.clone(),
            color: arrival.color,
            x: LABEL_X,
            y: y,
            align: Align::Left,
        });
        items.push(TextItem {
            text: arrival.projected_arrival.clone(),
            color: arrival.color,
            x: width as i32 - RIGHT_MARGIN,
            y: y,
            align: Align::Right,
        });
    }
    return items;
}

pub fn placeholder_items(lines: &[String], color: structs::Rgb) -> Vec<TextItem> {
    return lines.iter().take(MAX_ROWS).enumerate().map(|(i, line)| TextItem {
        text: line.clone(),
        color: color,
        x: 0,
        y: PLACEHOLDER_LINE_PITCH * i as i32,
        align: Align::Left,
    }).collect();
}

/// Wipes `imgbuf` and draws `items` onto it.
pub fn draw_items(imgbuf: &mut image::RgbImage, styles: &Styles, items: &[TextItem]) {
    let (width, height) = imgbuf.dimensions();
    imageproc::drawing::draw_filled_rect_mut(
        imgbuf, imageproc::rect::Rect::at(0, 0).of_size(width, height), image::Rgb([0u8; 3]));

    for item in items {
        let x = match item.align {
            Align::Left => item.x,
            Align::Right => item.x - text_width(styles, &item.text),
        };
        imageproc::drawing::draw_text_mut(
            imgbuf, pixel(item.color), x, item.y, scale(styles.text_height), &styles.font, &item.text);
    }
}

fn text_width(styles: &Styles, text: &str) -> i32 {
    return styles.font
        .layout(text, scale(styles.text_height), rusttype::point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
        .ceil() as i32;
}

fn pixel(color: structs::Rgb) -> image::Rgb<u8> {
    return image::Rgb([color.r, color.g, color.b]);
}

fn scale(s: f32) -> rusttype::Scale {
    return rusttype::Scale{x: s, y: s};
}

#[cfg(test)]
mod tests {
    use super::{arrival_items, draw_items, placeholder_items, Align, Styles, TextItem};
    use crate::structs::{ArrivalRecord, Rgb};

    const FONT_CANDIDATES: [&str; 2] = [
        "/usr/share/fonts/truetype/roboto/hinted/RobotoCondensed-Regular.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    ];

    fn test_styles() -> Option<Styles<'static>> {
        let bytes = FONT_CANDIDATES.iter().filter_map(|path| std::fs::read(path).ok()).next()?;
        let font = rusttype::Font::try_from_vec(bytes)?;
        return Some(Styles { font: font, text_height: 13.0 });
    }

    fn lit(imgbuf: &image::RgbImage, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) -> bool {
        return ys.flat_map(|y| xs.clone().map(move |x| (x, y)))
            .any(|(x, y)| imgbuf.get_pixel(x, y).0 != [0, 0, 0]);
    }

    fn record(line: &str, eta: &str, color: u32) -> ArrivalRecord {
        return ArrivalRecord {
            line: line.to_string(),
            color: Rgb::from_u32(color),
            projected_arrival: eta.to_string(),
            last_updated: "-".to_string(),
        };
    }

    #[test]
    fn two_rows_at_most() {
        let arrivals = vec![
            record("WTC", "5m", 0xD93A30),
            record("33rd", "11m", 0xFF9900),
            record("WTC", "15m", 0xD93A30),
        ];

        let items = arrival_items(&arrivals, 64, 32);

        assert_eq!(vec![
            TextItem { text: "WTC".to_string(), color: Rgb::from_u32(0xD93A30), x: 3, y: 1, align: Align::Left },
            TextItem { text: "5m".to_string(), color: Rgb::from_u32(0xD93A30), x: 61, y: 1, align: Align::Right },
            TextItem { text: "33rd".to_string(), color: Rgb::from_u32(0xFF9900), x: 3, y: 17, align: Align::Left },
            TextItem { text: "11m".to_string(), color: Rgb::from_u32(0xFF9900), x: 61, y: 17, align: Align::Right },
        ], items);
    }

    #[test]
    fn single_arrival() {
        let items = arrival_items(&[record("33rd", "-", 0xFF9900)], 64, 32);
        assert_eq!(2, items.len());
        assert_eq!("-", items[1].text);
        assert!(arrival_items(&[], 64, 32).is_empty());
    }

    #[test]
    fn draws_right_aligned_countdown() {
        let styles = match test_styles() {
            Some(styles) => styles,
            None => {
                println!("No font installed, skipping");
                return;
            },
        };
        let mut imgbuf = image::RgbImage::from_pixel(64, 32, image::Rgb([255, 255, 255]));

        draw_items(&mut imgbuf, &styles, &arrival_items(&[record("WTC", "5m", 0xD93A30)], 64, 32));

        assert!(lit(&imgbuf, 3..30, 0..16), "label missing");
        assert!(lit(&imgbuf, 40..62, 0..16), "countdown missing");
        assert!(!lit(&imgbuf, 62..64, 0..32), "countdown runs into the margin");
        assert!(!lit(&imgbuf, 0..64, 17..32), "second row should be empty");

        draw_items(&mut imgbuf, &styles, &[]);
        assert!(!lit(&imgbuf, 0..64, 0..32));
    }

    #[test]
    fn placeholder() {
        let lines = vec!["Waiting on".to_string(), "PATH api".to_string()];
        let items = placeholder_items(&lines, Rgb::from_u32(0xC7C7C7));
        assert_eq!(2, items.len());
        assert_eq!((0, 0), (items[0].x, items[0].y));
        assert_eq!((0, 14), (items[1].x, items[1].y));
        assert_eq!("PATH api", items[1].text);
    }
}
