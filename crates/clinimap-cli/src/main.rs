use clinimap::fetch::{DirFetcher, HttpFetcher, ResourceFetcher};
use clinimap::{ClinicType, EmbedConfig, Embedder, RawEmbedColors, RawEmbedConfig};
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Config(clinimap::Error),
    BaseUrl(url::ParseError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Config(err) => write!(f, "{err}"),
            CliError::BaseUrl(err) => write!(f, "Invalid --base-url: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<clinimap::Error> for CliError {
    fn from(value: clinimap::Error) -> Self {
        Self::Config(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Embed,
    Stylesheet,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    parent: Option<String>,
    clinic_type: Option<String>,
    main_color: Option<String>,
    sub_color: Option<String>,
    base_url: Option<String>,
    resources: Option<String>,
    out: Option<String>,
    input: Option<String>,
}

fn usage() -> &'static str {
    "clinimap-cli\n\
\n\
USAGE:\n\
  clinimap-cli embed [--parent <#id>] [--clinic-type a|b|c] [--main-color <hex>] [--sub-color <hex>] (--base-url <url> | --resources <dir>) [--out <path>] [<host.html>|-]\n\
  clinimap-cli stylesheet [--parent <#id>] [--main-color <hex>] [--sub-color <hex>] [--out <path>]\n\
\n\
NOTES:\n\
  - If <host.html> is omitted or '-', the host page is read from stdin.\n\
  - embed rewrites the host page and prints it to stdout by default; use --out to write a file.\n\
  - --resources serves img/ and json/ resources from a local directory instead of the network.\n\
  - Colors are 3- or 6-digit hex without the leading '#'; invalid values fall back to the defaults.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "embed" => args.command = Command::Embed,
            "stylesheet" => args.command = Command::Stylesheet,
            "--parent" => {
                let Some(parent) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.parent = Some(parent.clone());
            }
            "--clinic-type" => {
                let Some(clinic_type) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.clinic_type = Some(clinic_type.clone());
            }
            "--main-color" => {
                let Some(color) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.main_color = Some(color.clone());
            }
            "--sub-color" => {
                let Some(color) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.sub_color = Some(color.clone());
            }
            "--base-url" => {
                let Some(base) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.base_url = Some(base.clone());
            }
            "--resources" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.resources = Some(dir.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn embed_config(args: &Args) -> Result<EmbedConfig, CliError> {
    let raw = RawEmbedConfig {
        parent_selector: args.parent.clone(),
        clinic_type: args.clinic_type.clone(),
        colors: RawEmbedColors {
            main_color: args.main_color.clone(),
            sub_color: args.sub_color.clone(),
        },
    };
    Ok(EmbedConfig::from_raw(raw)?)
}

fn stylesheet_config(args: &Args) -> Result<EmbedConfig, CliError> {
    // The stylesheet does not depend on the clinic type; any tag works.
    let parent = args.parent.clone().unwrap_or_default();
    let colors = RawEmbedColors {
        main_color: args.main_color.clone(),
        sub_color: args.sub_color.clone(),
    };
    Ok(EmbedConfig::new(parent, ClinicType::A)?
        .with_colors(clinimap::EmbedColors::from_raw(&colors)))
}

fn run_embed<F: ResourceFetcher>(embedder: &mut Embedder, fetcher: &F) -> Result<(), CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(embedder.init(fetcher));
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Stylesheet => {
            let config = stylesheet_config(&args)?;
            let css = clinimap::render::embed_css(config.parent_selector(), config.colors());
            write_text(&css, args.out.as_deref())
        }
        Command::Embed => {
            let config = embed_config(&args)?;
            let host = read_input(args.input.as_deref())?;
            let mut embedder = Embedder::new(config, host);

            match (args.base_url.as_deref(), args.resources.as_deref()) {
                (Some(base), None) => {
                    let base = url::Url::parse(base).map_err(CliError::BaseUrl)?;
                    run_embed(&mut embedder, &HttpFetcher::new(base))?;
                }
                (None, Some(dir)) => {
                    run_embed(&mut embedder, &DirFetcher::new(dir))?;
                }
                _ => return Err(CliError::Usage(usage())),
            }

            write_text(embedder.document(), args.out.as_deref())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
