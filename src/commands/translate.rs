use dictionary::translator::{GoogleTranslator, Translator};
use dictionary::{LanguagePair, Settings};

pub(crate) async fn cmd_translate(text: &str, to: &str, from: Option<String>) -> anyhow::Result<()> {
    let settings = Settings::load()?;
    let pair = LanguagePair::new(from.unwrap_or_else(|| settings.from_language.clone()), to);

    let translator = GoogleTranslator::new(&settings)?;
    translator.check_ready()?;

    tracing::trace!(pair = %pair, "cmd_translate invoked");
    let translated = translator.translate(&pair, text).await?;
    println!("{translated}");
    Ok(())
}
