//! Dashboard Page
//!
//! Token-usage overview for a selected month: totals aggregated from the
//! usage buckets plus a per-bucket breakdown.

use chrono::{DateTime, Datelike, Utc};
use leptos::*;

use crate::api::reports::{self, UsageBucket};
use crate::api::runtime::use_runtime_config;
use crate::components::Loading;
use crate::state::use_ui_state;

/// Aggregated totals for the selected month
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UsageTotals {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl UsageTotals {
    pub fn combined(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// Sum bucket results into input/output totals
pub fn aggregate_totals(buckets: &[UsageBucket]) -> UsageTotals {
    let mut totals = UsageTotals::default();
    for bucket in buckets {
        for result in &bucket.results {
            totals.input_tokens += result.input_tokens;
            totals.output_tokens += result.output_tokens;
        }
    }
    totals
}

/// One row of the per-bucket breakdown
#[derive(Clone, Debug, PartialEq)]
pub struct UsageRow {
    pub label: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl UsageRow {
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// Flatten buckets into labeled rows, skipping empty buckets
pub fn usage_rows(buckets: &[UsageBucket]) -> Vec<UsageRow> {
    buckets
        .iter()
        .filter(|b| !b.results.is_empty())
        .map(|bucket| {
            let label = DateTime::<Utc>::from_timestamp(bucket.start_time, 0)
                .map(|dt| dt.format("%d/%m").to_string())
                .unwrap_or_default();

            let mut row = UsageRow {
                label,
                input_tokens: 0,
                output_tokens: 0,
            };
            for result in &bucket.results {
                row.input_tokens += result.input_tokens;
                row.output_tokens += result.output_tokens;
            }
            row
        })
        .collect()
}

/// Bar width in percent relative to the busiest row
pub fn bar_percent(value: u64, max: u64) -> u64 {
    if max == 0 {
        0
    } else {
        (value * 100) / max
    }
}

/// The last `count` months as `(value, label)` pairs, newest first
pub fn recent_months(now: DateTime<Utc>, count: usize) -> Vec<(String, String)> {
    const MONTH_NAMES: [&str; 12] = [
        "January", "February", "March", "April", "May", "June",
        "July", "August", "September", "October", "November", "December",
    ];

    let mut months = Vec::with_capacity(count);
    let mut year = now.year();
    let mut month = now.month();

    for _ in 0..count {
        months.push((
            format!("{:04}-{:02}", year, month),
            format!("{} {}", MONTH_NAMES[(month - 1) as usize], year),
        ));

        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }

    months
}

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let config = use_runtime_config();
    let ui = use_ui_state();

    let months = recent_months(Utc::now(), 12);
    let default_month = months
        .first()
        .map(|(value, _)| value.clone())
        .unwrap_or_default();

    let (month, set_month) = create_signal(default_month);
    let (buckets, set_buckets) = create_signal(Vec::<UsageBucket>::new());
    let (loading, set_loading) = create_signal(true);

    let reports_enabled = move || config.0.get().map(|c| c.reports_enabled).unwrap_or(false);

    // Refetch whenever the selected month changes (and on first render).
    // The response for a superseded month is discarded.
    create_effect(move |_| {
        let selected = month.get();
        if !reports_enabled() {
            return;
        }

        set_loading.set(true);
        spawn_local(async move {
            let result = reports::fetch_usage(&selected).await;

            if month.get_untracked() != selected {
                return; // user already picked a different month
            }
            set_loading.set(false);

            match result {
                Ok(report) => set_buckets.set(report.buckets),
                Err(e) => {
                    // keep the previous data on error
                    ui.show_error(&format!("Could not load usage: {}", e));
                }
            }
        });
    });

    let totals = move || aggregate_totals(&buckets.get());
    let rows = move || usage_rows(&buckets.get());

    view! {
        <div class="space-y-8">
            // Header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Dashboard"</h1>
                    <p class="text-gray-400 mt-1">"AI token usage for the selected month"</p>
                </div>

                <select
                    on:change=move |ev| set_month.set(event_target_value(&ev))
                    prop:value=move || month.get()
                    class="bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                >
                    {months.iter().map(|(value, label)| {
                        view! { <option value=value.clone()>{label.clone()}</option> }
                    }).collect_view()}
                </select>
            </div>

            {move || {
                if !reports_enabled() {
                    view! {
                        <section class="bg-gray-800 rounded-xl p-6 text-gray-400">
                            "Usage reporting is not configured on the server. "
                            "Add the reports admin key to enable this page."
                        </section>
                    }.into_view()
                } else if loading.get() {
                    view! { <Loading /> }.into_view()
                } else {
                    let totals = totals();
                    let rows = rows();
                    let max = rows.iter().map(|r| r.total()).max().unwrap_or(0);

                    view! {
                        // Stat cards
                        <div class="grid md:grid-cols-3 gap-4">
                            <StatCard label="Input tokens" value=totals.input_tokens />
                            <StatCard label="Output tokens" value=totals.output_tokens />
                            <StatCard label="Total" value=totals.combined() />
                        </div>

                        // Per-bucket breakdown
                        <section class="bg-gray-800 rounded-xl p-6">
                            <h2 class="text-xl font-semibold mb-4">"Daily breakdown"</h2>

                            {if rows.is_empty() {
                                view! {
                                    <p class="text-gray-400">"No usage recorded for this month."</p>
                                }.into_view()
                            } else {
                                rows.into_iter().map(|row| {
                                    let width = bar_percent(row.total(), max);
                                    view! {
                                        <div class="flex items-center space-x-3 py-1">
                                            <span class="w-12 text-xs text-gray-400">{row.label.clone()}</span>
                                            <div class="flex-1 bg-gray-700 rounded h-4 overflow-hidden">
                                                <div
                                                    class="bg-primary-600 h-4"
                                                    style=format!("width: {}%;", width)
                                                />
                                            </div>
                                            <span class="w-28 text-right text-xs text-gray-400">
                                                {format!("{} in / {} out", row.input_tokens, row.output_tokens)}
                                            </span>
                                        </div>
                                    }
                                }).collect_view()
                            }}
                        </section>
                    }.into_view()
                }
            }}
        </div>
    }
}

/// One stat tile
#[component]
fn StatCard(label: &'static str, value: u64) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-6 border border-gray-700">
            <p class="text-sm text-gray-400">{label}</p>
            <p class="text-3xl font-bold mt-2">{value}</p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::reports::UsageResult;
    use chrono::TimeZone;

    fn bucket(start_time: i64, results: Vec<(u64, u64)>) -> UsageBucket {
        UsageBucket {
            start_time,
            end_time: start_time + 86_400,
            results: results
                .into_iter()
                .map(|(input_tokens, output_tokens)| UsageResult {
                    input_tokens,
                    output_tokens,
                })
                .collect(),
        }
    }

    #[test]
    fn test_aggregate_totals_sums_all_results() {
        let buckets = vec![
            bucket(1_746_057_600, vec![(120, 45), (30, 5)]),
            bucket(1_746_144_000, vec![(50, 50)]),
        ];

        let totals = aggregate_totals(&buckets);
        assert_eq!(totals.input_tokens, 200);
        assert_eq!(totals.output_tokens, 100);
        assert_eq!(totals.combined(), 300);
    }

    #[test]
    fn test_usage_rows_skip_empty_buckets() {
        let buckets = vec![
            bucket(1_746_057_600, vec![(120, 45)]),
            bucket(1_746_144_000, vec![]),
        ];

        let rows = usage_rows(&buckets);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total(), 165);
    }

    #[test]
    fn test_bar_percent_handles_zero_max() {
        assert_eq!(bar_percent(10, 0), 0);
        assert_eq!(bar_percent(50, 100), 50);
        assert_eq!(bar_percent(100, 100), 100);
    }

    #[test]
    fn test_recent_months_wraps_the_year() {
        let now = Utc.with_ymd_and_hms(2025, 2, 15, 12, 0, 0).unwrap();
        let months = recent_months(now, 4);

        assert_eq!(
            months.iter().map(|(v, _)| v.as_str()).collect::<Vec<_>>(),
            vec!["2025-02", "2025-01", "2024-12", "2024-11"]
        );
        assert_eq!(months[0].1, "February 2025");
        assert_eq!(months[2].1, "December 2024");
    }
}
