use std::future::Future;
use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;

use picksheet_infra::{DatabaseConfig, MySqlPickingQueries, PickingQueries, build_picking_sheet};
use picksheet_picking::PickingSheet;

use crate::args::{ArgsError, Invocation, USAGE_HINT, parse_args};

/// Parse `args`, hand the invocation to `runner` and turn the outcome into the
/// process exit code.
///
/// A missing order list writes the usage hint to `stdout`, skips `runner`
/// and succeeds. A failed `runner` is logged and exits non-zero.
pub async fn execute<I, S, W, R, Fut>(args: I, stdout: &mut W, runner: R) -> ExitCode
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    W: Write,
    R: FnOnce(Invocation) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    let invocation = match parse_args(args) {
        Ok(invocation) => invocation,
        Err(ArgsError::Usage) => {
            if let Err(err) = writeln!(stdout, "{USAGE_HINT}") {
                tracing::error!(%err, "failed to write usage hint");
                return ExitCode::FAILURE;
            }
            return ExitCode::SUCCESS;
        }
    };

    match runner(invocation).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "failed to produce picking sheet");
            ExitCode::FAILURE
        }
    }
}

/// Build the sheet for `invocation` against any query backend.
pub async fn picking_sheet<Q>(queries: &Q, invocation: &Invocation) -> anyhow::Result<PickingSheet>
where
    Q: PickingQueries + ?Sized,
{
    build_picking_sheet(queries, invocation.raw(), invocation.order_ids())
        .await
        .context("build picking sheet")
}

/// Connect to the configured data store, build the sheet and print it to
/// standard output.
///
/// The connection is closed before returning, whether or not the sheet could
/// be built.
pub async fn run(invocation: &Invocation) -> anyhow::Result<()> {
    let config = DatabaseConfig::from_env().context("load database configuration")?;
    let queries = MySqlPickingQueries::connect(&config)
        .await
        .context("connect to data store")?;

    let sheet = picking_sheet(&queries, invocation).await;
    queries.close().await;
    let sheet = sheet?;

    let mut out = std::io::stdout().lock();
    write!(out, "{sheet}").context("write picking sheet")?;
    out.flush().context("write picking sheet")?;
    Ok(())
}
