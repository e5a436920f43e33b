use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let report = catalog_importer_lib::run()
        .await
        .context("Import could not be started")?;

    println!("{}", report.render_text());
    Ok(())
}
