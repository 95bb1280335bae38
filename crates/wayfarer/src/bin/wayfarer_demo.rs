//! Exercises the builder end to end: positional typing, option bundling,
//! `--` end-of-options, specificity ordering, and a repeated option.
//!
//! Run `wayfarer-demo add 2 3`, `wayfarer-demo --capabilities`, or
//! `wayfarer-demo --repl` to drop into the interactive loop.

use std::process::ExitCode;

use wf_cli::{BoundArguments, BoundValue, CancellationSignal, Cli, HandlerOutcome};

fn int(args: &BoundArguments, name: &str) -> i64 {
	match args.get(name) {
		Some(BoundValue::Int(n)) => *n,
		_ => 0,
	}
}

fn flag(args: &BoundArguments, name: &str) -> bool {
	matches!(args.get(name), Some(BoundValue::Bool(true)))
}

fn str_value(args: &BoundArguments, name: &str) -> String {
	match args.get(name) {
		Some(BoundValue::Str(s)) => s.clone(),
		_ => String::new(),
	}
}

fn list(args: &BoundArguments, name: &str) -> Vec<String> {
	match args.get(name) {
		Some(BoundValue::List(values)) => values
			.iter()
			.map(|v| match v {
				BoundValue::Str(s) => s.clone(),
				other => format!("{other:?}"),
			})
			.collect(),
		_ => Vec::new(),
	}
}

fn build_cli() -> anyhow::Result<wf_cli::App> {
	tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

	let app = Cli::new("wayfarer-demo", "0.1.0")
		.description("demonstration commands for the route pattern language")
		.route("add {x:int} {y:int}", |args: &BoundArguments, _: &CancellationSignal| {
			println!("{}", int(args, "x") + int(args, "y"));
			HandlerOutcome::ExitCode(0)
		})
		.route(
			"tar --create,-c --verbose,-v --file,-f {file}",
			|args: &BoundArguments, _: &CancellationSignal| {
				println!(
					"create={} verbose={} file={}",
					flag(args, "create"),
					flag(args, "verbose"),
					str_value(args, "file")
				);
				HandlerOutcome::ExitCode(0)
			},
		)
		.route("grep {pattern} {*files}", |args: &BoundArguments, _: &CancellationSignal| {
			println!("pattern={} files={:?}", str_value(args, "pattern"), list(args, "files"));
			HandlerOutcome::ExitCode(0)
		})
		.route("deploy {env}", |args: &BoundArguments, _: &CancellationSignal| {
			println!("deploying to {}", str_value(args, "env"));
			HandlerOutcome::ExitCode(0)
		})
		.route("deploy prod", |_: &BoundArguments, _: &CancellationSignal| {
			println!("deploying to prod (guarded route)");
			HandlerOutcome::ExitCode(0)
		})
		.route("build --tag,-t {v}*", |args: &BoundArguments, _: &CancellationSignal| {
			println!("tags={:?}", list(args, "v"));
			HandlerOutcome::ExitCode(0)
		})
		.build()?;
	Ok(app)
}

fn main() -> anyhow::Result<ExitCode> {
	let app = build_cli()?;
	let argv: Vec<String> = std::env::args().skip(1).collect();

	if argv.first().map(String::as_str) == Some("--repl") {
		let mut terminal = wf_term::TerminaTerminal::open()?;
		return match app.repl(&mut terminal) {
			Ok(code) => Ok(ExitCode::from(code as u8)),
			Err(err) => {
				eprintln!("repl error: {err}");
				Ok(ExitCode::from(1))
			}
		};
	}

	Ok(ExitCode::from(app.run(&argv) as u8))
}
