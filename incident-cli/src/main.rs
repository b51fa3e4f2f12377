use anyhow::Context;
use clap::{ArgGroup, Args as ClapArgs, Parser, Subcommand};
use incident_cli::commands::{self, Edits};
use incident_cli::render::incident_table;
use incident_cli::HttpIncidentApi;
use incident_core::query::DEFAULT_PAGE_SIZE;
use incident_core::{ApiConfig, IncidentApi, QueryState, Sort, SortDirection, SortField};
use incident_model::{Choice, IncidentDraft, IncidentId, Service, Severity, Status};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "incident", about = "Command-line client for the incident service")]
struct Args {
    /// Base URL of the incident API.
    #[arg(long, env = "INCIDENT_API_URL", default_value = "http://localhost:8080/api")]
    api_url: String,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// List incidents, one page at a time.
    List(ListArgs),
    /// Show one incident as JSON.
    Get { id: String },
    /// Report a new incident.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, value_parser = choice::<Service>)]
        service: Service,
        #[arg(long, value_parser = choice::<Severity>)]
        severity: Option<Severity>,
        #[arg(long, value_parser = choice::<Status>)]
        status: Option<Status>,
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        summary: Option<String>,
    },
    /// Change severity, status, owner or summary of an incident.
    Update {
        id: String,
        #[arg(long, value_parser = choice::<Severity>)]
        severity: Option<Severity>,
        #[arg(long, value_parser = choice::<Status>)]
        status: Option<Status>,
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        summary: Option<String>,
    },
}

#[derive(ClapArgs, Debug)]
#[command(group(ArgGroup::new("direction").args(["asc", "desc"])))]
struct ListArgs {
    /// Zero-based page index.
    #[arg(long, default_value_t = 0)]
    page: u32,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    size: u32,
    /// title, service, severity, status, createdAt or owner.
    #[arg(long, default_value = "createdAt")]
    sort: SortField,
    #[arg(long)]
    asc: bool,
    #[arg(long)]
    desc: bool,
    /// Match against incident titles.
    #[arg(long)]
    search: Option<String>,
    #[arg(long, value_parser = choice::<Service>)]
    service: Option<Service>,
    #[arg(long, value_parser = choice::<Severity>)]
    severity: Option<Severity>,
    #[arg(long, value_parser = choice::<Status>)]
    status: Option<Status>,
}

impl ListArgs {
    fn query(&self) -> QueryState {
        let direction = if self.asc {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        };
        let mut query = QueryState {
            sort: Sort {
                field: self.sort,
                direction,
            },
            search: self.search.clone().unwrap_or_default(),
            service: self.service,
            severity: self.severity,
            status: self.status,
            ..QueryState::default()
        };
        query.set_size(self.size);
        query.page = self.page;
        query
    }
}

/// Case-insensitive parser for the fixed value sets.
fn choice<T: Choice>(value: &str) -> Result<T, String> {
    T::ALL
        .iter()
        .copied()
        .find(|c| c.as_str().eq_ignore_ascii_case(value))
        .ok_or_else(|| {
            let expected: Vec<&str> = T::ALL.iter().map(Choice::as_str).collect();
            format!("unknown {} '{value}', expected one of {}", T::KIND, expected.join(", "))
        })
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    let api = HttpIncidentApi::new(ApiConfig::new(args.api_url));

    match args.cmd {
        Cmd::List(list_args) => {
            let (rows, pager) = commands::list(&api, list_args.query()).await?;
            print!("{}", incident_table(&rows, pager));
        }
        Cmd::Get { id } => {
            let incident = api
                .get_incident(&IncidentId::new(id.as_str()))
                .await
                .with_context(|| format!("fetch incident {id}"))?;
            print_json(&incident)?;
        }
        Cmd::Create {
            title,
            service,
            severity,
            status,
            owner,
            summary,
        } => {
            let draft = IncidentDraft {
                title,
                service: Some(service),
                severity: severity.unwrap_or_default(),
                status: status.unwrap_or_default(),
                owner: owner.unwrap_or_default(),
                summary: summary.unwrap_or_default(),
            };
            print_json(&commands::create(&api, draft).await?)?;
        }
        Cmd::Update {
            id,
            severity,
            status,
            owner,
            summary,
        } => {
            let edits = Edits {
                severity,
                status,
                owner,
                summary,
            };
            print_json(&commands::update(&api, IncidentId::new(id), edits).await?)?;
        }
    }
    Ok(())
}
