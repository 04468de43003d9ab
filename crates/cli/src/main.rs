use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    picksheet_observability::init();

    picksheet_cli::execute(std::env::args(), &mut std::io::stdout(), |invocation| async move {
        picksheet_cli::run(&invocation).await
    })
    .await
}
