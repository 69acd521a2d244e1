use serenity::async_trait;
use std::sync::Arc;

use crate::interaction::paginator::{PageContext, PageFormatter};
use crate::platform::fake::FakePlatform;
use crate::platform::{ChatPlatform, RenderedPage};


/// Formatter used across session tests: joined numbers plus a page footer.
struct NumberList;

#[async_trait]
impl PageFormatter<i32> for NumberList {
    async fn format_page(&self, items: &[i32], page: PageContext) -> RenderedPage {
        let body = if items.is_empty() {
            "No entries".to_string()
        } else {
            items
                .iter()
                .map(i32::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        RenderedPage::titled("Numbers", body)
            .with_footer(format!("Page {}/{}", page.page, page.page_count))
    }
}

fn fake_platform() -> (Arc<FakePlatform>, Arc<dyn ChatPlatform>) {
    let fake = Arc::new(FakePlatform::new());
    let platform: Arc<dyn ChatPlatform> = fake.clone();
    (fake, platform)
}

/// Lets spawned session tasks process everything already queued.
async fn drain() {
    for _ in 0..25 {
        tokio::task::yield_now().await;
    }
}
