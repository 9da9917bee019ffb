// SPDX-License-Identifier: MPL-2.0
use fotobox_guest::app::{self, Flags};
use tracing::Level;

const HELP: &str = "\
fotobox-guest: view, filter, frame and share one wedding photo

USAGE:
  fotobox_guest [OPTIONS] [LINK]

ARGS:
  LINK                  Photo link, as /photo/<id> or a full page URL

OPTIONS:
  --lang <LOCALE>       Interface language (e.g. en-US, fr)
  --config-dir <DIR>    Directory holding settings.toml
  --verbose             Log debug output
  -h, --help            Print this help

ENVIRONMENT:
  FOTOBOX_API_URL       Origin of the photo service
";

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let verbose = args.contains("--verbose");
    let lang = args.opt_value_from_str("--lang").unwrap_or_else(|err| {
        eprintln!("ignoring --lang: {err}");
        None
    });
    let config_dir = args.opt_value_from_str("--config-dir").unwrap_or_else(|err| {
        eprintln!("ignoring --config-dir: {err}");
        None
    });
    let deep_link = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    tracing_subscriber::fmt()
        .with_max_level(if verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    app::run(Flags {
        lang,
        deep_link,
        config_dir,
    })
}
