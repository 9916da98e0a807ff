//! A thin CLI front end for running the lexers and the parser over files.

#![deny(clippy::pedantic, missing_debug_implementations, missing_docs, rust_2018_idioms)]

use source_file::SourceFile;
use std::path::PathBuf;
use std::process::ExitCode;

fn usage() {
  let current_exe_name = std::env::current_exe()
    .ok()
    .and_then(|x| Some(x.file_name()?.to_str()?.to_owned()))
    .unwrap_or_else(|| "<unknown>".to_owned());
  println!("usage:");
  println!("  {current_exe_name} [options] <path>...");
  let rest_of_usage = r"
options:
  -h, --help
    show this help

arguments:
  <path>...
    paths to process. a `.mlb` path runs the build-description lexer; any
    other path is lexed and parsed as a source file. set RUST_LOG=info to
    see the parser's informational output.
";
  print!("{rest_of_usage}");
}

fn run() -> usize {
  match env_logger::try_init_from_env(env_logger::Env::default().default_filter_or("error")) {
    Ok(()) => {}
    Err(e) => {
      println!("could not start env logger: {e}");
      return 1;
    }
  }
  let mut args = pico_args::Arguments::from_env();
  if args.contains(["-h", "--help"]) {
    usage();
    return 0;
  }
  let paths: Vec<PathBuf> = args.finish().into_iter().map(PathBuf::from).collect();
  if paths.is_empty() {
    usage();
    return 1;
  }
  // fixity declarations carry across the files, in the order given
  let mut fix_env = sml_fixity::Env::std_basis();
  let mut errors = 0usize;
  for path in paths {
    let contents = match std::fs::read_to_string(&path) {
      Ok(x) => x,
      Err(e) => {
        println!("{}: {e}", path.display());
        errors += 1;
        continue;
      }
    };
    let file = SourceFile::new(path.clone(), contents);
    if path.extension().is_some_and(|ext| ext == "mlb") {
      match mlb_lex::get(&file) {
        Ok(tokens) => log::info!("{}: {} tokens", path.display(), tokens.len()),
        Err(e) => {
          let d = diagnostic::Diagnostic {
            header: diagnostic::Header::Syntax,
            range: e.range(),
            message: e.to_string(),
            explain: e.explain(),
            code: diagnostic::Code::n(e.code()),
          };
          print!("{}", diagnostic::show(&d, &file));
          errors += 1;
        }
      }
    } else {
      match sml_file_syntax::SourceFileSyntax::new(&file, &mut fix_env) {
        Ok(_) => {}
        Err(e) => {
          print!("{}", e.show(&file));
          errors += 1;
        }
      }
    }
  }
  errors
}

fn main() -> ExitCode {
  let errors = run();
  let code = u8::try_from(errors).unwrap_or(u8::MAX);
  ExitCode::from(code)
}
