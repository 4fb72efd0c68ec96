extern crate anyhow;
extern crate image;
extern crate rusttype;
extern crate std;

use anyhow::Context;
use crate::config;
use crate::drawing;
use crate::result;
use crate::structs;

/// Whatever shows arrivals to people on the platform. Each call replaces
/// everything that was on screen before.
pub trait Screen {
    fn render(&mut self, arrivals: &[structs::ArrivalRecord]) -> result::PathDashResult<()>;
    fn render_placeholder(&mut self) -> result::PathDashResult<()>;
}

/// Headless stand-in that only logs what would be drawn.
pub struct LogScreen {
    placeholder: Vec<String>,
}

impl LogScreen {
    pub fn new(config: &config::DisplayConfig) -> LogScreen {
        return LogScreen { placeholder: config.placeholder.clone() };
    }
}

impl Screen for LogScreen {
    fn render(&mut self, arrivals: &[structs::ArrivalRecord]) -> result::PathDashResult<()> {
        for arrival in arrivals.iter().take(drawing::MAX_ROWS) {
            info!("{:<8} {:>5}  ({}, updated {})",
                  arrival.line, arrival.projected_arrival, arrival.color, arrival.last_updated);
        }
        return Ok(());
    }

    fn render_placeholder(&mut self) -> result::PathDashResult<()> {
        info!("{}", self.placeholder.join(" "));
        return Ok(());
    }
}

/// Renders into an RGB frame the size of the LED matrix. `png_out`, when set,
/// receives a copy of every frame.
pub struct MatrixScreen<'a> {
    styles: drawing::Styles<'a>,
    frame: image::RgbImage,
    placeholder: Vec<String>,
    placeholder_color: structs::Rgb,
    png_out: Option<std::path::PathBuf>,
}

impl MatrixScreen<'static> {
    pub fn new(config: &config::DisplayConfig, png_out: Option<std::path::PathBuf>) -> result::PathDashResult<MatrixScreen<'static>> {
        let font_bytes = std::fs::read(&config.font_path)
            .with_context(|| format!("Reading font '{}'", config.font_path))?;
        let font = rusttype::Font::try_from_vec(font_bytes)
            .ok_or(result::make_error(&format!("Unusable font '{}'", config.font_path)))?;

        return Ok(MatrixScreen {
            styles: drawing::Styles {
                font: font,
                text_height: config.text_height,
            },
            frame: image::RgbImage::new(config.width, config.height),
            placeholder: config.placeholder.clone(),
            placeholder_color: config.placeholder_color,
            png_out: png_out,
        });
    }
}

impl<'a> MatrixScreen<'a> {
    fn draw(&mut self, items: &[drawing::TextItem]) -> result::PathDashResult<()> {
        drawing::draw_items(&mut self.frame, &self.styles, items);
        if let Some(ref path) = self.png_out {
            self.frame.save(path)
                .with_context(|| format!("Saving frame to {:?}", path))?;
        }
        return Ok(());
    }
}

impl<'a> Screen for MatrixScreen<'a> {
    fn render(&mut self, arrivals: &[structs::ArrivalRecord]) -> result::PathDashResult<()> {
        let (width, height) = self.frame.dimensions();
        let items = drawing::arrival_items(arrivals, width, height);
        return self.draw(&items);
    }

    fn render_placeholder(&mut self) -> result::PathDashResult<()> {
        let items = drawing::placeholder_items(&self.placeholder, self.placeholder_color);
        return self.draw(&items);
    }
}
