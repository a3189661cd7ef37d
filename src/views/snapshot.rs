use crate::components::{alert_banner, html_escape, metric_card::MetricCard};
use crate::fmt::{ValueFormat, format_compact, format_date_full};
use crate::models::{DailySnapshot, Platform, PlatformDays};
use crate::router::{Router, View};
use crate::store::AppState;
use chrono::{DateTime, Utc};

pub fn register(router: &mut Router) {
    router.register(View::Snapshot, Box::new(|state| render(state)));
}

pub fn render(state: &AppState) -> String {
    render_at(state, Utc::now())
}

/// Cross-platform audience size: every platform's follower or subscriber
/// count, missing platforms counting as zero.
pub fn audience_total(day: &DailySnapshot) -> f64 {
    let p = &day.platforms;
    metric(p.youtube.as_ref(), |y| y.subscribers_total)
        + metric(p.linkedin.as_ref(), |l| l.followers_total)
        + metric(p.instagram.as_ref(), |i| i.followers_total)
        + metric(p.beehiiv.as_ref(), |b| b.subscribers_total)
        + metric(p.tiktok.as_ref(), |t| t.followers_total)
}

/// Cross-platform engagement: likes plus comments on the video platforms,
/// the single engagements counter on LinkedIn and Instagram, nothing from
/// the newsletter. (The content log view uses a different per-item formula;
/// the two are intentionally not unified.)
pub fn engagement_total(day: &DailySnapshot) -> f64 {
    let p = &day.platforms;
    metric(p.youtube.as_ref(), |y| y.likes)
        + metric(p.youtube.as_ref(), |y| y.comments)
        + metric(p.linkedin.as_ref(), |l| l.engagements)
        + metric(p.instagram.as_ref(), |i| i.engagements)
        + metric(p.tiktok.as_ref(), |t| t.likes)
        + metric(p.tiktok.as_ref(), |t| t.comments)
}

fn metric<T>(section: Option<&T>, f: impl Fn(&T) -> Option<f64>) -> f64 {
    section.and_then(f).unwrap_or(0.0)
}

/// Per-metric 7-day series for sparklines; days without the metric are
/// dropped rather than plotted as zero.
pub fn metric_series(days: &[DailySnapshot], f: impl Fn(&PlatformDays) -> Option<f64>) -> Vec<f64> {
    days.iter().filter_map(|d| f(&d.platforms)).collect()
}

pub fn render_at(state: &AppState, now: DateTime<Utc>) -> String {
    // Nothing to show until the first snapshot lands.
    let Some(today) = &state.today else {
        return String::new();
    };
    let yesterday = state.yesterday.as_ref();
    let days = &state.week_days;

    let audience_spark: Vec<f64> = days.iter().map(audience_total).collect();
    let engagement_spark: Vec<f64> = days.iter().map(engagement_total).collect();

    let yt = today.platforms.youtube.as_ref();
    let yt_prev = yesterday.and_then(|d| d.platforms.youtube.as_ref());
    let li = today.platforms.linkedin.as_ref();
    let li_prev = yesterday.and_then(|d| d.platforms.linkedin.as_ref());
    let ig = today.platforms.instagram.as_ref();
    let ig_prev = yesterday.and_then(|d| d.platforms.instagram.as_ref());
    let bh = today.platforms.beehiiv.as_ref();
    let bh_prev = yesterday.and_then(|d| d.platforms.beehiiv.as_ref());
    let tt = today.platforms.tiktok.as_ref();
    let tt_prev = yesterday.and_then(|d| d.platforms.tiktok.as_ref());

    let yt_views_spark = metric_series(days, |p| p.youtube.as_ref().and_then(|y| y.views));
    let yt_subs_spark =
        metric_series(days, |p| p.youtube.as_ref().and_then(|y| y.subscribers_total));
    let li_impressions_spark =
        metric_series(days, |p| p.linkedin.as_ref().and_then(|l| l.impressions));
    let li_followers_spark =
        metric_series(days, |p| p.linkedin.as_ref().and_then(|l| l.followers_total));
    let ig_reach_spark = metric_series(days, |p| p.instagram.as_ref().and_then(|i| i.reach));
    let ig_followers_spark =
        metric_series(days, |p| p.instagram.as_ref().and_then(|i| i.followers_total));
    let bh_subs_spark =
        metric_series(days, |p| p.beehiiv.as_ref().and_then(|b| b.subscribers_total));
    let bh_web_spark = metric_series(days, |p| p.beehiiv.as_ref().and_then(|b| b.web_views));
    let tt_views_spark = metric_series(days, |p| p.tiktok.as_ref().and_then(|t| t.views));
    let tt_followers_spark =
        metric_series(days, |p| p.tiktok.as_ref().and_then(|t| t.followers_total));

    let aggregate = format!(
        r#"<div class="section snapshot__aggregate"><div class="grid grid--4">{}{}{}{}</div></div>"#,
        MetricCard::new(
            "Total Audience",
            Some(audience_total(today)),
            yesterday.map(audience_total),
        )
        .format(ValueFormat::Compact)
        .spark(&audience_spark)
        .render(),
        MetricCard::new(
            "Engagements",
            Some(engagement_total(today)),
            yesterday.map(engagement_total),
        )
        .format(ValueFormat::Compact)
        .spark(&engagement_spark)
        .render(),
        MetricCard::new(
            "YouTube Views",
            yt.and_then(|y| y.views),
            yt_prev.and_then(|y| y.views),
        )
        .format(ValueFormat::Compact)
        .spark(&yt_views_spark)
        .render(),
        MetricCard::new(
            "Newsletter Subs",
            bh.and_then(|b| b.subscribers_total),
            bh_prev.and_then(|b| b.subscribers_total),
        )
        .format(ValueFormat::Compact)
        .spark(&bh_subs_spark)
        .render(),
    );

    let top_video = yt
        .and_then(|y| y.top_video.as_ref())
        .map(|tv| {
            format!(
                r#"<div class="snapshot__top-content"><div class="snapshot__top-content-title">Top video today</div><div class="snapshot__top-content-name">{} — {} views</div></div>"#,
                html_escape(&tv.title),
                format_compact(tv.views),
            )
        })
        .unwrap_or_default();

    let youtube_section = section(
        Platform::Youtube,
        format!(
            "{}{}{}{}{}",
            MetricCard::new("Views", yt.and_then(|y| y.views), yt_prev.and_then(|y| y.views))
                .format(ValueFormat::Compact)
                .spark(&yt_views_spark)
                .render(),
            MetricCard::new(
                "Watch Hours",
                yt.and_then(|y| y.watch_hours),
                yt_prev.and_then(|y| y.watch_hours),
            )
            .render(),
            MetricCard::new(
                "Subscribers",
                yt.and_then(|y| y.subscribers_total),
                yt_prev.and_then(|y| y.subscribers_total),
            )
            .format(ValueFormat::Compact)
            .spark(&yt_subs_spark)
            .render(),
            MetricCard::new("CTR", yt.and_then(|y| y.ctr), yt_prev.and_then(|y| y.ctr))
                .format(ValueFormat::Percent)
                .render(),
            MetricCard::new(
                "Avg Duration",
                yt.and_then(|y| y.avg_view_duration),
                yt_prev.and_then(|y| y.avg_view_duration),
            )
            .format(ValueFormat::Duration)
            .render(),
        ),
        top_video,
    );

    let linkedin_section = section(
        Platform::Linkedin,
        format!(
            "{}{}{}{}{}",
            MetricCard::new(
                "Impressions",
                li.and_then(|l| l.impressions),
                li_prev.and_then(|l| l.impressions),
            )
            .format(ValueFormat::Compact)
            .spark(&li_impressions_spark)
            .render(),
            MetricCard::new(
                "Engagements",
                li.and_then(|l| l.engagements),
                li_prev.and_then(|l| l.engagements),
            )
            .format(ValueFormat::Compact)
            .render(),
            MetricCard::new(
                "Followers",
                li.and_then(|l| l.followers_total),
                li_prev.and_then(|l| l.followers_total),
            )
            .format(ValueFormat::Compact)
            .spark(&li_followers_spark)
            .render(),
            MetricCard::new(
                "Engagement Rate",
                li.and_then(|l| l.engagement_rate),
                li_prev.and_then(|l| l.engagement_rate),
            )
            .format(ValueFormat::Percent)
            .render(),
            MetricCard::new(
                "Profile Views",
                li.and_then(|l| l.profile_views),
                li_prev.and_then(|l| l.profile_views),
            )
            .render(),
        ),
        String::new(),
    );

    let instagram_section = section(
        Platform::Instagram,
        format!(
            "{}{}{}{}{}",
            MetricCard::new("Reach", ig.and_then(|i| i.reach), ig_prev.and_then(|i| i.reach))
                .format(ValueFormat::Compact)
                .spark(&ig_reach_spark)
                .render(),
            MetricCard::new(
                "Engagements",
                ig.and_then(|i| i.engagements),
                ig_prev.and_then(|i| i.engagements),
            )
            .format(ValueFormat::Compact)
            .render(),
            MetricCard::new(
                "Followers",
                ig.and_then(|i| i.followers_total),
                ig_prev.and_then(|i| i.followers_total),
            )
            .format(ValueFormat::Compact)
            .spark(&ig_followers_spark)
            .render(),
            MetricCard::new(
                "Engagement Rate",
                ig.and_then(|i| i.engagement_rate),
                ig_prev.and_then(|i| i.engagement_rate),
            )
            .format(ValueFormat::Percent)
            .render(),
            MetricCard::new(
                "Story Views",
                ig.and_then(|i| i.stories_views),
                ig_prev.and_then(|i| i.stories_views),
            )
            .render(),
        ),
        String::new(),
    );

    let beehiiv_section = section(
        Platform::Beehiiv,
        format!(
            "{}{}{}{}",
            MetricCard::new(
                "Subscribers",
                bh.and_then(|b| b.subscribers_total),
                bh_prev.and_then(|b| b.subscribers_total),
            )
            .format(ValueFormat::Compact)
            .spark(&bh_subs_spark)
            .render(),
            MetricCard::new(
                "Open Rate",
                bh.and_then(|b| b.open_rate),
                bh_prev.and_then(|b| b.open_rate),
            )
            .format(ValueFormat::Percent)
            .render(),
            MetricCard::new(
                "Click Rate",
                bh.and_then(|b| b.click_rate),
                bh_prev.and_then(|b| b.click_rate),
            )
            .format(ValueFormat::Percent)
            .render(),
            MetricCard::new(
                "Web Views",
                bh.and_then(|b| b.web_views),
                bh_prev.and_then(|b| b.web_views),
            )
            .spark(&bh_web_spark)
            .render(),
        ),
        String::new(),
    );

    let tiktok_section = section(
        Platform::Tiktok,
        format!(
            "{}{}{}{}{}",
            MetricCard::new("Views", tt.and_then(|t| t.views), tt_prev.and_then(|t| t.views))
                .format(ValueFormat::Compact)
                .spark(&tt_views_spark)
                .render(),
            MetricCard::new("Likes", tt.and_then(|t| t.likes), tt_prev.and_then(|t| t.likes))
                .render(),
            MetricCard::new(
                "Followers",
                tt.and_then(|t| t.followers_total),
                tt_prev.and_then(|t| t.followers_total),
            )
            .format(ValueFormat::Compact)
            .spark(&tt_followers_spark)
            .render(),
            MetricCard::new(
                "Comments",
                tt.and_then(|t| t.comments),
                tt_prev.and_then(|t| t.comments),
            )
            .render(),
            MetricCard::new(
                "Avg Watch Time",
                tt.and_then(|t| t.avg_watch_time),
                tt_prev.and_then(|t| t.avg_watch_time),
            )
            .render(),
        ),
        String::new(),
    );

    format!(
        r#"<div class="page-header"><h1 class="page-header__title">Today's Snapshot</h1><p class="page-header__subtitle">{}</p></div>
{}
{aggregate}
<div class="snapshot__platforms">{youtube_section}{linkedin_section}{instagram_section}{beehiiv_section}{tiktok_section}</div>"#,
        format_date_full(&today.date),
        alert_banner::render(&state.alerts, now),
    )
}

fn section(platform: Platform, cards: String, extra: String) -> String {
    format!(
        r#"<div class="section"><h2 class="section__title"><span class="platform-dot platform-dot--{}"></span>{}</h2><div class="grid grid--5">{cards}</div>{extra}</div>"#,
        platform.key(),
        platform.display_name(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fmt::{Direction, calc_delta};
    use crate::models::{BeehiivDay, LinkedinDay, TiktokDay, YoutubeDay};

    fn day(date: &str, yt_subs: Option<f64>, li_followers: Option<f64>) -> DailySnapshot {
        DailySnapshot {
            date: date.to_string(),
            platforms: PlatformDays {
                youtube: yt_subs.map(|subscribers_total| YoutubeDay {
                    subscribers_total: Some(subscribers_total),
                    ..Default::default()
                }),
                linkedin: li_followers.map(|followers_total| LinkedinDay {
                    followers_total: Some(followers_total),
                    ..Default::default()
                }),
                ..Default::default()
            },
        }
    }

    #[test]
    fn total_audience_day_over_day() {
        let today = day("2026-08-27", Some(1000.0), Some(500.0));
        let yesterday = day("2026-08-26", Some(900.0), Some(450.0));

        let current = audience_total(&today);
        let previous = audience_total(&yesterday);
        assert_eq!(current, 1500.0);
        assert_eq!(previous, 1350.0);

        let delta = calc_delta(Some(current), Some(previous));
        assert_eq!(delta.direction, Direction::Positive);
        assert_eq!(delta.formatted, "+11.1%");
    }

    #[test]
    fn engagement_total_uses_per_platform_fields() {
        let mut snapshot = day("2026-08-27", None, None);
        snapshot.platforms.youtube = Some(YoutubeDay {
            likes: Some(10.0),
            comments: Some(5.0),
            ..Default::default()
        });
        snapshot.platforms.linkedin = Some(LinkedinDay {
            engagements: Some(20.0),
            ..Default::default()
        });
        snapshot.platforms.tiktok = Some(TiktokDay {
            likes: Some(3.0),
            comments: Some(2.0),
            ..Default::default()
        });
        // Beehiiv contributes audience, never engagement.
        snapshot.platforms.beehiiv = Some(BeehiivDay {
            subscribers_total: Some(9000.0),
            ..Default::default()
        });
        assert_eq!(engagement_total(&snapshot), 40.0);
    }

    #[test]
    fn renders_nothing_without_today() {
        let state = AppState::default();
        assert_eq!(render(&state), "");
    }

    #[test]
    fn metric_series_drops_missing_days() {
        let days = vec![
            day("2026-08-25", Some(100.0), None),
            day("2026-08-26", None, None),
            day("2026-08-27", Some(120.0), None),
        ];
        let series = metric_series(&days, |p| p.youtube.as_ref().and_then(|y| y.subscribers_total));
        assert_eq!(series, vec![100.0, 120.0]);
    }

    #[test]
    fn renders_aggregate_and_platform_sections() {
        let mut state = AppState::default();
        state.week_days = vec![
            day("2026-08-26", Some(900.0), Some(450.0)),
            day("2026-08-27", Some(1000.0), Some(500.0)),
        ];
        state.yesterday = state.week_days.first().cloned();
        state.today = state.week_days.last().cloned();

        let html = render(&state);
        assert!(html.contains("Total Audience"));
        assert!(html.contains("1.5K"));
        assert!(html.contains("+11.1%"));
        assert!(html.contains("YouTube"));
        assert!(html.contains("TikTok"));
    }
}
