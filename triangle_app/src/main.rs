//! Hello triangle: vertex array object, wireframe
//!
//! Opens an 800x600 window and draws the tutorial triangle in wireframe until
//! the window is closed or Escape is pressed.

use std::process::ExitCode;

use gl_engine::foundation::logging;
use gl_engine::prelude::*;
use log::{error, info};

fn main() -> ExitCode {
    logging::init();

    let config = TutorialConfig::for_step(TutorialStep::VertexArray);
    match gl_engine::run(&config) {
        Ok(summary) => {
            info!(
                "Rendered {} frames, closed by {:?}",
                summary.frames_rendered, summary.close_reason
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Application error: {e}");
            ExitCode::FAILURE
        }
    }
}
