//! Dashboard Page
//!
//! Headline metrics and monthly revenue. The payload sits in a process-wide
//! TTL cache so switching tabs inside the freshness window costs nothing.
//! A mount past the TTL fetches again; only the refresh button forces it.

use std::future::Future;
use std::sync::{Arc, OnceLock};

use leptos::prelude::*;
use leptos::task::spawn_local;
use shopdesk_core::aggregate::{monthly_revenue, MonthlyRevenue};
use shopdesk_core::clock::{Clock, Millis};
use shopdesk_core::models::low_stock;
use shopdesk_core::TtlCache;

use super::money;
use crate::commands;
use crate::context::use_app_context;
use crate::models::DashboardMetrics;
use crate::store::{use_app_store, AppStateStoreFields};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub metrics: DashboardMetrics,
    pub revenue: Vec<MonthlyRevenue>,
}

static DASHBOARD_CACHE: OnceLock<TtlCache<DashboardData>> = OnceLock::new();

/// Shared slot; the TTL is fixed by whichever mount touches it first
fn dashboard_cache(ttl_ms: Millis) -> &'static TtlCache<DashboardData> {
    DASHBOARD_CACHE.get_or_init(|| TtlCache::new(ttl_ms))
}

async fn fetch_dashboard() -> Result<DashboardData, String> {
    let metrics = commands::dashboard_metrics().await?;
    let bills = commands::revenue_bills().await?;
    Ok(DashboardData {
        metrics,
        revenue: monthly_revenue(&bills),
    })
}

/// Cached payload on mount, a fresh one when the user asked for it
async fn load_through<C, F, Fut>(
    cache: &TtlCache<DashboardData, C>,
    force: bool,
    fetch: F,
) -> Result<Arc<DashboardData>, String>
where
    C: Clock,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<DashboardData, String>>,
{
    if force {
        cache.refresh(fetch).await
    } else {
        cache.get_or_fetch(fetch).await
    }
}

/// Bar heights as a percentage of the best month
fn bar_heights(revenue: &[MonthlyRevenue]) -> Vec<(String, f64, u32)> {
    let max = revenue.iter().map(|m| m.revenue).fold(0.0, f64::max);
    revenue
        .iter()
        .map(|m| {
            let height = if max > 0.0 { (m.revenue / max * 100.0).round() as u32 } else { 0 };
            (m.month.to_string(), m.revenue, height)
        })
        .collect()
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (data, set_data) = signal::<Option<Arc<DashboardData>>>(None);
    let (loading, set_loading) = signal(false);

    let load = move |force: bool| {
        let ttl = ctx.ui_config.get_untracked().dashboard_ttl_ms;
        set_loading.set(true);
        spawn_local(async move {
            match load_through(dashboard_cache(ttl), force, fetch_dashboard).await {
                Ok(fresh) => set_data.set(Some(fresh)),
                Err(e) => ctx.error(format!("Failed to load dashboard: {}", e)),
            }
            set_loading.set(false);
        });
    };

    load(false);

    let low = Memo::new(move |_| {
        store.products().with(|products| {
            low_stock(products)
                .into_iter()
                .map(|p| (p.name.clone(), p.stock, p.reorder_level))
                .collect::<Vec<_>>()
        })
    });

    let card = |label: &'static str, value: String| view! {
        <div class="metric-card">
            <span class="metric-label">{label}</span>
            <span class="metric-value">{value}</span>
        </div>
    };

    view! {
        <section class="page dashboard-page">
            <header class="page-header">
                <h2>"Dashboard"</h2>
                <button disabled=move || loading.get() on:click=move |_| load(true)>
                    {move || if loading.get() { "Refreshing…" } else { "Refresh" }}
                </button>
            </header>

            {move || data.get().map(|d| {
                let m = &d.metrics;
                view! {
                    <div class="metric-grid">
                        {card("Today's Sales", money(m.today_sales))}
                        {card("This Month", money(m.month_sales))}
                        {card("Outstanding Dues", money(m.total_due))}
                        {card("Low Stock Items", m.low_stock_count.to_string())}
                        {card("Pending Services", m.pending_services.to_string())}
                        {card("Customers", m.total_customers.to_string())}
                    </div>
                    <h3>"Monthly Revenue"</h3>
                    <div class="bar-chart">
                        {bar_heights(&d.revenue).into_iter().map(|(month, revenue, height)| view! {
                            <div class="bar" title=money(revenue)>
                                <div class="bar-fill" style=format!("height: {}%", height)></div>
                                <span class="bar-label">{month}</span>
                            </div>
                        }).collect_view()}
                    </div>
                }
            })}

            <h3>"Low Stock"</h3>
            <ul class="low-stock-list">
                {move || low.get().into_iter().map(|(name, stock, reorder)| view! {
                    <li>{format!("{}: {} left (reorder at {})", name, stock, reorder)}</li>
                }).collect_view()}
            </ul>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopdesk_core::ManualClock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample() -> DashboardData {
        DashboardData {
            metrics: DashboardMetrics::default(),
            revenue: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_only_mount_past_ttl_or_refresh_fetches() {
        let clock = Arc::new(ManualClock::new(0));
        let cache = TtlCache::with_clock(300_000, Arc::clone(&clock));
        let counter = AtomicUsize::new(0);
        let fetches = &counter;
        let fetch = move || async move {
            fetches.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(sample())
        };

        let first = load_through(&cache, false, fetch).await.unwrap();
        clock.advance(299_999);
        let again = load_through(&cache, false, fetch).await.unwrap();
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        clock.advance(2);
        load_through(&cache, false, fetch).await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        load_through(&cache, true, fetch).await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_bar_heights_scale_to_best_month() {
        let revenue = vec![
            MonthlyRevenue { month: "Jan", month_index: 1, revenue: 50.0 },
            MonthlyRevenue { month: "Feb", month_index: 2, revenue: 200.0 },
        ];
        let bars = bar_heights(&revenue);
        assert_eq!(bars[0], ("Jan".to_string(), 50.0, 25));
        assert_eq!(bars[1].2, 100);
        assert!(bar_heights(&[]).is_empty());
    }
}
