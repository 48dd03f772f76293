use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use finance_client::api::models::{
    AnalyzeInvoiceRequest, CashflowRequest, ChatRequest, Invoice, LoginRequest, Organization, PaymentRequest,
    RegisterRequest, Vendor,
};
use finance_client::config::{ConfigError, parse_candidates};
use finance_client::routing::{DEFAULT_ROUTE, GuardOutcome, LoggingNavigator};
use finance_client::{ApiConfig, ApiError, AppContext};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("not logged in; run `finance-cli login` first")]
    NotAuthenticated,
    #[error("route {route} requires login: {redirect}")]
    GuardRedirect { route: String, redirect: String },
}

#[derive(Parser, Debug)]
#[command(name = "finance-cli", about = "Finance API client with origin detection and session handling")]
struct Cli {
    /// Comma-separated candidate origins; overrides FINANCE_API_URLS.
    #[arg(long)]
    api_urls: Option<String>,

    /// Per-probe timeout in milliseconds; overrides FINANCE_API_TIMEOUT_MS.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Route the session is considered to be on, used as the login return URL.
    #[arg(long, env = "FINANCE_ROUTE", default_value = DEFAULT_ROUTE)]
    route: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the origin in use without probing.
    Status,
    /// Probe candidates (if not already resolved) and print the chosen origin.
    Detect,
    /// Forget the detected origin and probe again.
    Refresh,
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FINANCE_PASSWORD")]
        password: String,
    },
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "FINANCE_PASSWORD")]
        password: String,
    },
    Logout,
    Whoami,
    /// Run the auth guard against a route.
    Open { route: String },
    Api(ApiCommand),
}

#[derive(Args, Debug)]
struct ApiCommand {
    #[command(subcommand)]
    command: ApiSubcommand,
}

#[derive(Subcommand, Debug)]
enum ApiSubcommand {
    #[command(subcommand)]
    Invoice(InvoiceSubcommand),
    #[command(subcommand)]
    Vendor(VendorSubcommand),
    #[command(subcommand)]
    Payment(PaymentSubcommand),
    #[command(subcommand)]
    Org(OrgSubcommand),
    #[command(subcommand)]
    User(UserSubcommand),
    #[command(subcommand)]
    Cashflow(CashflowSubcommand),
    #[command(subcommand)]
    Ai(AiSubcommand),
}

#[derive(Subcommand, Debug)]
enum InvoiceSubcommand {
    List { org_id: Uuid },
    Read { id: Uuid },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: Uuid,
        #[arg(long)]
        data: String,
    },
    Delete { id: Uuid },
}

#[derive(Subcommand, Debug)]
enum VendorSubcommand {
    List { org_id: Uuid },
    Read { id: Uuid },
    Create {
        org_id: Uuid,
        #[arg(long)]
        data: String,
    },
    Update {
        id: Uuid,
        #[arg(long)]
        data: String,
    },
    Delete { id: Uuid },
}

#[derive(Subcommand, Debug)]
enum PaymentSubcommand {
    ListOrg { org_id: Uuid },
    ListInvoice { invoice_id: Uuid },
    Read { id: Uuid },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: Uuid,
        #[arg(long)]
        data: String,
    },
    Delete { id: Uuid },
}

#[derive(Subcommand, Debug)]
enum OrgSubcommand {
    List,
    Read { id: Uuid },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: Uuid,
        #[arg(long)]
        data: String,
    },
}

#[derive(Subcommand, Debug)]
enum UserSubcommand {
    List { org_id: Uuid },
    Read { id: Uuid },
    Role {
        id: Uuid,
        #[arg(long)]
        role: String,
    },
    Delete { id: Uuid },
}

#[derive(Subcommand, Debug)]
enum CashflowSubcommand {
    List { org_id: Uuid },
    Month { org_id: Uuid, year: i32, month: u32 },
    Generate { org_id: Uuid },
}

#[derive(Subcommand, Debug)]
enum AiSubcommand {
    Chat { prompt: String },
    AnalyzeInvoice {
        #[arg(long)]
        text: String,
    },
    Predict {
        org_id: Uuid,
        #[arg(long, default_value_t = 3)]
        months: u32,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ApiConfig::from_env()?;
    if let Some(raw) = &cli.api_urls {
        config.candidates = parse_candidates(raw)?;
    }
    if let Some(ms) = cli.timeout_ms {
        if ms == 0 {
            return Err(ConfigError::InvalidValue { var: "--timeout-ms", value: ms.to_string() }.into());
        }
        config.probe_timeout_ms = ms;
    }

    let navigator = Arc::new(LoggingNavigator::new(&cli.route));
    let ctx = AppContext::new(&config, navigator)?;

    match cli.command {
        Command::Status => print_status(&ctx),
        Command::Detect => {
            ctx.resolver.resolve().await;
            print_status(&ctx)
        }
        Command::Refresh => {
            ctx.resolver.refresh().await;
            print_status(&ctx)
        }
        Command::Login { email, password } => {
            let request = LoginRequest { email, password };
            let response = ctx.api.auth().login_and_establish(&request, &ctx.auth).await?;
            if response.token.is_none() {
                return Err(CliError::NotAuthenticated);
            }
            print_json(&response.user)
        }
        Command::Register { name, email, password } => {
            let request = RegisterRequest { name, email, password };
            print_json(&ctx.api.auth().register(&request).await?)
        }
        Command::Logout => {
            ctx.auth.logout();
            println!("logged out");
            Ok(())
        }
        Command::Whoami => match ctx.auth.current_user_value() {
            Some(user) if ctx.auth.is_authenticated_value() => print_json(&user),
            _ => Err(CliError::NotAuthenticated),
        },
        Command::Open { route } => match ctx.guard().check(&route) {
            GuardOutcome::Allow => {
                println!("{route}");
                Ok(())
            }
            GuardOutcome::Redirect(redirect) => Err(CliError::GuardRedirect { route, redirect }),
        },
        Command::Api(api) => run_api(&ctx, api).await,
    }
}

async fn run_api(ctx: &AppContext, api: ApiCommand) -> Result<(), CliError> {
    match api.command {
        ApiSubcommand::Invoice(cmd) => run_invoice(ctx, cmd).await,
        ApiSubcommand::Vendor(cmd) => run_vendor(ctx, cmd).await,
        ApiSubcommand::Payment(cmd) => run_payment(ctx, cmd).await,
        ApiSubcommand::Org(cmd) => run_org(ctx, cmd).await,
        ApiSubcommand::User(cmd) => run_user(ctx, cmd).await,
        ApiSubcommand::Cashflow(cmd) => run_cashflow(ctx, cmd).await,
        ApiSubcommand::Ai(cmd) => run_ai(ctx, cmd).await,
    }
}

async fn run_invoice(ctx: &AppContext, cmd: InvoiceSubcommand) -> Result<(), CliError> {
    let invoices = ctx.api.invoices();
    match cmd {
        InvoiceSubcommand::List { org_id } => print_json(&invoices.list(org_id).await?),
        InvoiceSubcommand::Read { id } => print_json(&invoices.details(id).await?),
        InvoiceSubcommand::Create { data } => {
            let invoice: Invoice = parse_data(&data)?;
            print_json(&invoices.create(&invoice).await?)
        }
        InvoiceSubcommand::Update { id, data } => {
            let invoice: Invoice = parse_data(&data)?;
            print_json(&invoices.update(id, &invoice).await?)
        }
        InvoiceSubcommand::Delete { id } => {
            invoices.delete(id).await?;
            print_deleted(id)
        }
    }
}

async fn run_vendor(ctx: &AppContext, cmd: VendorSubcommand) -> Result<(), CliError> {
    let vendors = ctx.api.vendors();
    match cmd {
        VendorSubcommand::List { org_id } => print_json(&vendors.list(org_id).await?),
        VendorSubcommand::Read { id } => print_json(&vendors.detail(id).await?),
        VendorSubcommand::Create { org_id, data } => {
            let vendor: Vendor = parse_data(&data)?;
            print_json(&vendors.create(org_id, &vendor).await?)
        }
        VendorSubcommand::Update { id, data } => {
            let vendor: Vendor = parse_data(&data)?;
            print_json(&vendors.update(id, &vendor).await?)
        }
        VendorSubcommand::Delete { id } => {
            vendors.delete(id).await?;
            print_deleted(id)
        }
    }
}

async fn run_payment(ctx: &AppContext, cmd: PaymentSubcommand) -> Result<(), CliError> {
    let payments = ctx.api.payments();
    match cmd {
        PaymentSubcommand::ListOrg { org_id } => print_json(&payments.for_org(org_id).await?),
        PaymentSubcommand::ListInvoice { invoice_id } => print_json(&payments.for_invoice(invoice_id).await?),
        PaymentSubcommand::Read { id } => print_json(&payments.get(id).await?),
        PaymentSubcommand::Create { data } => {
            let payment: PaymentRequest = parse_data(&data)?;
            print_json(&payments.create(&payment).await?)
        }
        PaymentSubcommand::Update { id, data } => {
            let payment: PaymentRequest = parse_data(&data)?;
            print_json(&payments.update(id, &payment).await?)
        }
        PaymentSubcommand::Delete { id } => {
            payments.delete(id).await?;
            print_deleted(id)
        }
    }
}

async fn run_org(ctx: &AppContext, cmd: OrgSubcommand) -> Result<(), CliError> {
    let orgs = ctx.api.organizations();
    match cmd {
        OrgSubcommand::List => print_json(&orgs.list().await?),
        OrgSubcommand::Read { id } => print_json(&orgs.get(id).await?),
        OrgSubcommand::Create { data } => {
            let org: Organization = parse_data(&data)?;
            print_json(&orgs.create(&org).await?)
        }
        OrgSubcommand::Update { id, data } => {
            let org: Organization = parse_data(&data)?;
            print_json(&orgs.update(id, &org).await?)
        }
    }
}

async fn run_user(ctx: &AppContext, cmd: UserSubcommand) -> Result<(), CliError> {
    let users = ctx.api.users();
    match cmd {
        UserSubcommand::List { org_id } => print_json(&users.for_org(org_id).await?),
        UserSubcommand::Read { id } => print_json(&users.get(id).await?),
        UserSubcommand::Role { id, role } => print_json(&users.update_role(id, &role).await?),
        UserSubcommand::Delete { id } => {
            users.delete(id).await?;
            print_deleted(id)
        }
    }
}

async fn run_cashflow(ctx: &AppContext, cmd: CashflowSubcommand) -> Result<(), CliError> {
    let cashflow = ctx.api.cashflow();
    match cmd {
        CashflowSubcommand::List { org_id } => print_json(&cashflow.list(org_id).await?),
        CashflowSubcommand::Month { org_id, year, month } => {
            print_json(&cashflow.for_month(org_id, year, month).await?)
        }
        CashflowSubcommand::Generate { org_id } => print_json(&cashflow.generate(org_id).await?),
    }
}

async fn run_ai(ctx: &AppContext, cmd: AiSubcommand) -> Result<(), CliError> {
    let ai = ctx.api.openai();
    let out = match cmd {
        AiSubcommand::Chat { prompt } => ai.chat(&ChatRequest { prompt }).await?,
        AiSubcommand::AnalyzeInvoice { text } => {
            ai.analyze_invoice(&AnalyzeInvoiceRequest { invoice_text: text }).await?
        }
        AiSubcommand::Predict { org_id, months } => ai.predict_cashflow(&CashflowRequest { org_id, months }).await?,
    };
    print_json(&out)
}

fn print_status(ctx: &AppContext) -> Result<(), CliError> {
    let status = ctx.resolver.status();
    print_json(&json!({
        "origin": status.origin,
        "confirmed": status.confirmed,
        "candidates": ctx.resolver.candidates(),
    }))
}

fn print_deleted(id: Uuid) -> Result<(), CliError> {
    print_json(&json!({ "deleted": id }))
}

fn parse_data<T: DeserializeOwned>(data: &str) -> Result<T, CliError> {
    Ok(serde_json::from_str(data)?)
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
