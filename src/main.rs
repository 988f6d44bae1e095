use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches};
use serde_json::Value;
use std::path::Path;

use urlbind::config::{load_resources, resources::DEFAULT_CONFIG_FILE};
use urlbind::{logging, parse_assignment, BoundParams, Route, RouteDefaults, TemplateParser};

fn params_arg() -> Arg {
    Arg::new("params")
        .value_name("NAME=VALUE")
        .num_args(1..)
        .action(ArgAction::Append)
        .help("Parameter values; VALUE is read as JSON when it parses, else as a string")
}

fn template_arg() -> Arg {
    Arg::new("template")
        .value_name("TEMPLATE")
        .required(true)
        .help("URL template such as /users/:id")
}

fn cli() -> clap::Command {
    clap::Command::new("urlbind")
        .about("Bind parameters into :name URL templates")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            clap::Command::new("bind")
                .about("Print the URL for a template and parameter values")
                .arg(template_arg())
                .arg(params_arg())
                .arg(
                    Arg::new("keep_trailing_slashes")
                        .long("keep-trailing-slashes")
                        .action(ArgAction::SetTrue)
                        .help("Do not strip trailing slashes from the result"),
                ),
        )
        .subcommand(
            clap::Command::new("slots")
                .about("Print the parameter slots of a template as JSON")
                .arg(template_arg()),
        )
        .subcommand(
            clap::Command::new("plan")
                .about("Print the request for a resource action")
                .arg(
                    Arg::new("routes")
                        .short('r')
                        .long("routes")
                        .value_name("FILE")
                        .default_value(DEFAULT_CONFIG_FILE)
                        .help("Path to a YAML file containing resources"),
                )
                .arg(Arg::new("resource").value_name("RESOURCE").required(true))
                .arg(Arg::new("action").value_name("ACTION").required(true))
                .arg(params_arg())
                .arg(
                    Arg::new("data")
                        .short('d')
                        .long("data")
                        .value_name("JSON")
                        .help("Request payload"),
                ),
        )
}

fn bound_params(matches: &ArgMatches) -> Result<BoundParams> {
    matches
        .get_many::<String>("params")
        .unwrap_or_default()
        .map(|raw| {
            parse_assignment(raw).with_context(|| format!("Expected NAME=VALUE, got '{}'", raw))
        })
        .collect()
}

fn run_bind(matches: &ArgMatches) -> Result<String> {
    let template = matches
        .get_one::<String>("template")
        .context("missing template")?;
    let defaults =
        RouteDefaults::new().with_strip_trailing_slashes(!matches.get_flag("keep_trailing_slashes"));

    let route = Route::new(template, defaults)?;
    Ok(route.bind(&bound_params(matches)?))
}

fn run_slots(matches: &ArgMatches) -> Result<String> {
    let template = matches
        .get_one::<String>("template")
        .context("missing template")?;
    let parsed = TemplateParser::parse(template)?;
    Ok(serde_json::to_string_pretty(parsed.slots())?)
}

fn run_plan(matches: &ArgMatches) -> Result<String> {
    let routes = matches
        .get_one::<String>("routes")
        .context("missing routes file")?;
    let name = matches
        .get_one::<String>("resource")
        .context("missing resource")?;
    let action = matches
        .get_one::<String>("action")
        .context("missing action")?;

    let data: Option<Value> = matches
        .get_one::<String>("data")
        .map(|raw| serde_json::from_str(raw).context("--data is not valid JSON"))
        .transpose()?;

    let resources = load_resources(Path::new(routes))?;
    let resource = match resources.get(name) {
        Some(resource) => resource,
        None => bail!("Unknown resource: {}", name),
    };

    let plan = resource.plan(action, &bound_params(matches)?, data.as_ref())?;
    let mut out = format!("{} {}", plan.method, plan.uri);
    if !plan.options.is_empty() {
        out.push('\n');
        out.push_str(&serde_json::to_string_pretty(&plan.options)?);
    }
    if let Some(body) = &plan.body {
        out.push('\n');
        out.push_str(&serde_json::to_string_pretty(body)?);
    }
    Ok(out)
}

fn main() -> Result<()> {
    logging::init_logging()?;

    let matches = cli().get_matches();
    let output = match matches.subcommand() {
        Some(("bind", sub)) => run_bind(sub)?,
        Some(("slots", sub)) => run_slots(sub)?,
        Some(("plan", sub)) => run_plan(sub)?,
        Some((other, _)) => bail!("Unknown command: {}", other),
        None => bail!("No command given"),
    };
    println!("{}", output);
    Ok(())
}
