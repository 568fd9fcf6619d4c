use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use roster_core::{build_patient_list, ClientConfig, ClientConfigOverrides, Selection, ViewState};
use roster_fhir::{patients_from_bundle_str, FhirClient};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "roster-cli",
    about = "Liệt kê bệnh nhân từ máy chủ FHIR hoặc từ bundle JSON đã lưu."
)]
struct Args {
    /// URL truy vấn Patient (mặc định: máy chủ công khai wildfhir4).
    #[arg(long)]
    endpoint: Option<String>,

    /// Đọc bundle từ file thay vì gọi máy chủ.
    #[arg(short, long, conflicts_with = "endpoint")]
    input: Option<PathBuf>,

    /// Id bệnh nhân cần mở rộng chi tiết.
    #[arg(short, long)]
    select: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let outcome = match &args.input {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("Không đọc được file {path:?}"))?;
            patients_from_bundle_str(&data)
        }
        None => {
            let config = ClientConfig::from(ClientConfigOverrides {
                endpoint: args.endpoint.clone(),
                accept: None,
            });
            let client = FhirClient::new(config);
            tracing::info!(endpoint = %client.config().endpoint, "fetching patients");
            client.fetch_patients().await
        }
    };

    if let Err(err) = &outcome {
        tracing::error!(error = %err, "Error fetching patients");
    }

    let mut state = ViewState::default();
    state.complete(outcome);

    let mut selection = Selection::default();
    if !selection.select(args.select.as_deref()) && args.select.is_some() {
        tracing::warn!("ignoring empty --select value");
    }

    print!("{}", build_patient_list(&state, &selection));
    Ok(())
}
