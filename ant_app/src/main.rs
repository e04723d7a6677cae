// main.rs - egui frontend for the multi-ant turmite engine

use eframe::egui;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use ant_engine::{ConfigError, Session};

mod palette; // Color index -> display color
mod ui;      // eframe::App implementation

// Initial canvas size in pixels; the canvas resizes the grid to fit later
const INITIAL_WIDTH: u32 = 800;
const INITIAL_HEIGHT: u32 = 600;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app = AntApp::new().inspect_err(|err| tracing::error!(%err, "built-in preset failed to load"))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Turmites",
        options,
        Box::new(|_cc| Box::new(app)),
    )?;
    Ok(())
}

/// Frontend state around one simulation session.
pub struct AntApp {
    pub session: Session,
    pub selected_preset: usize,
    pub last_frame: Instant,
    pub canvas_size: (u32, u32),
    pub config_text: String,
    pub config_error: Option<ConfigError>,
}

impl AntApp {
    fn new() -> Result<Self, ConfigError> {
        let session = Session::new(INITIAL_WIDTH, INITIAL_HEIGHT)?;
        let config_text = session.export_config()?;
        Ok(Self {
            session,
            selected_preset: 0,
            last_frame: Instant::now(),
            canvas_size: (INITIAL_WIDTH, INITIAL_HEIGHT),
            config_text,
            config_error: None,
        })
    }

    pub fn apply_selected_preset(&mut self) {
        self.session.pause();
        let applied = self
            .session
            .select_preset(self.selected_preset)
            .and_then(|()| self.session.export_config());
        match applied {
            Ok(text) => {
                self.config_text = text;
                self.config_error = None;
            }
            Err(err) => self.config_error = Some(err),
        }
    }

    pub fn load_config_text(&mut self) {
        self.session.pause();
        match self.session.load_config(&self.config_text) {
            Ok(_) => self.config_error = None,
            Err(err) => {
                tracing::warn!(%err, "configuration refused");
                self.config_error = Some(err);
            }
        }
    }

    pub fn save_config_text(&mut self) {
        match self.session.export_config() {
            Ok(text) => {
                self.config_text = text;
                self.config_error = None;
            }
            Err(err) => self.config_error = Some(err),
        }
    }
}
