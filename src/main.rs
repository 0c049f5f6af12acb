use socialflow::{
    logger, AppShell, EnvKeySelector, GeminiClient, GeminiConfig, GeneratedImage, KeySelector,
    MediaKind, NavSection, TokioClock,
};
use socialflow::session::onboarding::SocialAccount;
use std::env;
use std::fs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(logger::LoggerConfig::from_env())?;
    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = GeminiConfig::from_env();
    logger::log_config_info(&config);

    let client = match GeminiClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            log::error!("❌ Failed to initialize Gemini client: {}", e);
            return Err(e.into());
        }
    };

    let clock = TokioClock::new();
    let mut shell = AppShell::new();

    log::info!("🔐 Signing in...");
    let event = shell.login.google_login(&clock).await?;
    shell.dispatch(event)?;

    if let Ok(key) = env::var("INSTAGRAM_API_KEY") {
        shell.onboarding.set_key(SocialAccount::Instagram, key);
        shell.onboarding.connect(SocialAccount::Instagram, &clock).await;
    }
    let event = shell.onboarding.skip();
    shell.dispatch(event)?;

    let dashboard = shell.dashboard();
    for stat in &dashboard.stats {
        log::info!("📊 {}: {} (+{})", stat.title, stat.value, stat.trend);
    }

    if let Ok(niche) = env::var("SOCIALFLOW_NICHE") {
        shell.ideas.niche = niche.clone();
        shell.trends.niche = niche;
    }

    log::info!("💡 Brainstorming ideas and checking trends...");
    shell.navigate(NavSection::Generator);
    let (_, _) = futures::join!(
        shell.ideas.generate(&client),
        shell.trends.on_mount(&client)
    );

    match (shell.ideas.ideas.result(), shell.ideas.ideas.error()) {
        (Some(ideas), _) => {
            for idea in ideas {
                println!(
                    "[{} | {} potential] {}\n  {}\n  {}",
                    idea.platform,
                    idea.estimated_engagement,
                    idea.title,
                    idea.description,
                    idea.hashtag_line()
                );
            }
        }
        (None, Some(error)) => log::error!("❌ {}", error),
        _ => {}
    }

    if let Some(analysis) = shell.trends.analysis.result() {
        println!("\n📈 Trends for {}:\n{}", shell.trends.niche, analysis);
    }

    if let Ok(prompt) = env::var("SOCIALFLOW_IMAGE_PROMPT") {
        shell.navigate(NavSection::MediaStudio);
        shell.media.set_mode(MediaKind::Image);
        shell.media.prompt = prompt;
        shell.media.generate(&client, None).await;

        if let Some(media) = shell.media.output.result() {
            log::info!("🎨 Image ready for prompt '{}'", media.prompt);
            let filename = format!("generated_image_{}.png", chrono::Utc::now().timestamp());
            match GeneratedImage::from_data_uri(&media.url).map(|image| image.bytes()) {
                Some(Ok(bytes)) => match fs::write(&filename, bytes) {
                    Ok(_) => log::info!("💾 Image saved to: {}", filename),
                    Err(e) => log::error!("❌ Failed to save image: {}", e),
                },
                Some(Err(e)) => log::error!("❌ Failed to decode image: {}", e),
                None => log::error!("❌ Unexpected image locator"),
            }
        } else if let Some(error) = shell.media.output.error() {
            log::error!("❌ Image generation failed: {}", error);
        }
    }

    if let Ok(prompt) = env::var("SOCIALFLOW_VIDEO_PROMPT") {
        shell.navigate(NavSection::MediaStudio);
        shell.media.set_mode(MediaKind::Video);
        shell.media.prompt = prompt;
        let host = EnvKeySelector;
        log::info!("🎬 Synthesizing video (this may take a minute)...");
        shell
            .media
            .generate(&client, Some(&host as &dyn KeySelector))
            .await;

        match (shell.media.output.result(), shell.media.output.error()) {
            (Some(media), _) => println!("\n🎬 Video: {}", media.url),
            (None, Some(error)) => log::error!("❌ Video generation failed: {}", error),
            _ => {}
        }
    }

    log::info!("🎉 Done");
    Ok(())
}
