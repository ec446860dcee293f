use std::io::Read;
use std::path::PathBuf;

use eyre::{Context, Result};
use itertools::Itertools;
use mirrorcube_core::{SignedAxis, ViewKind};
use mirrorcube_sim::{CubeImage, SimCube};
use mirrorcube_view::MirrorCubeController;
use mirrorprefs::Preferences;

use crate::script::{self, TouchScript};

/// Mirrored cube command-line interface
///
/// Drives two headless cube views (front and end) that always show the same
/// logical cube.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// User preferences file (YAML).
    #[arg(short, long, global = true)]
    pub prefs: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Replay a touch script and print both cubes afterwards.
    Play {
        /// Touch script (YAML), use '-' for stdin.
        #[arg(value_parser)]
        script: clio::Input,
    },
    /// Scramble both cubes and print them.
    Scramble {
        /// Number of moves.
        #[arg(short = 'n', long)]
        length: Option<usize>,
        /// Random seed.
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Print the effective preferences as YAML.
    Prefs,
}

pub(crate) fn exec(args: Args) -> Result<()> {
    let mut prefs =
        Preferences::try_load(args.prefs.as_deref()).context("error loading preferences")?;

    match args.subcommand {
        Subcommand::Play { mut script } => {
            let mut buffer = String::new();
            script
                .read_to_string(&mut buffer)
                .context("error reading touch script")?;
            let script = TouchScript::from_yaml(&buffer).context("error parsing touch script")?;

            let mut controller = script::headless_controller(script.screen(), prefs)?;
            let rotations = script::play(&mut controller, &script)?;
            script::settle(&mut controller)?;

            println!("rotations: [{}]", rotations.iter().join(", "));
            print_views(&controller);
            Ok(())
        }

        Subcommand::Scramble { length, seed } => {
            if let Some(length) = length {
                prefs.scramble.length = length;
            }
            if seed.is_some() {
                prefs.scramble.seed = seed;
            }
            let screen = TouchScript::default().screen();
            let mut controller = script::headless_controller(screen, prefs)?;
            controller.scramble()?;
            script::settle(&mut controller)?;
            print_views(&controller);
            Ok(())
        }

        Subcommand::Prefs => {
            let yaml = serde_norway::to_string(&prefs).context("error serializing preferences")?;
            print!("{yaml}");
            Ok(())
        }
    }
}

fn print_views(controller: &MirrorCubeController<SimCube>) {
    for view in [ViewKind::Front, ViewKind::End] {
        let image = controller.cube(view).image();
        let solved = if image.is_solved() { " (solved)" } else { "" };
        println!("{view}{solved}:");
        print_image(image);
    }
    let mirrored = controller.cube(ViewKind::Front).image() == controller.cube(ViewKind::End).image();
    println!("mirrored: {mirrored}");
}

fn print_image(image: &CubeImage) {
    for face in SignedAxis::ALL {
        println!("  {face}: {}", image.face(face).iter().join(""));
    }
}
