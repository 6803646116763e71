//! Hello triangle, minimal step: buffer upload only, filled polygons
//!
//! Same window and loop as `hello_triangle`, without a vertex array object.
//! Core profiles draw nothing from this setup; the step exists to show the
//! buffer upload on its own.

use std::process::ExitCode;

use gl_engine::foundation::logging;
use gl_engine::prelude::*;
use log::{error, info};

fn main() -> ExitCode {
    logging::init();

    let config = TutorialConfig::for_step(TutorialStep::Minimal);
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
