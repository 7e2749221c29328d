use netliq::{Language, ReportStore, generate_report};
use netliq_demos::common::{builder, scratch_dir, writer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let netliq = builder()
        .cache_dir(scratch_dir("archive").join("cache"))
        .language(Language::from_code(
            &std::env::var("NETLIQ_LANGUAGE").unwrap_or_default(),
        ))
        .build()?;
    let a = netliq.assess().await?;

    // Report generation never fails; errors come back as text.
    let ctx = a.report_context();
    let language = netliq.config().language;
    let text = generate_report(writer().as_ref(), &ctx, language).await;

    let store = ReportStore::new(scratch_dir("archive").join("reports"));
    store.save(netliq.today(), language.code(), &text, Some(&ctx))?;

    println!("{text}");
    println!("Archived reports:");
    for key in store.list() {
        println!("  {} [{}]", key.date, key.language);
    }

    Ok(())
}
