//! RSS 2.0 rendering.
//!
//! The renderer is pure: the fallback build date is handed in by the caller,
//! so identical records always produce identical bytes.

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset};
use quick_xml::escape::{escape, partial_escape};

use crate::collector::DocumentRecord;
use crate::config::FeedConfig;
use crate::history::format_rfc822;

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// Render the feed. Records without a date are left out.
///
/// `lastBuildDate` is the first record's date when it has one, otherwise
/// `fallback_build_date`.
pub fn render(
    records: &[DocumentRecord],
    config: &FeedConfig,
    fallback_build_date: DateTime<FixedOffset>,
) -> String {
    let last_build = records
        .first()
        .and_then(|r| r.date)
        .unwrap_or(fallback_build_date);
    let contact = partial_escape(config.contact()).into_owned();

    let items: Vec<String> = records
        .iter()
        .filter_map(|r| r.date.map(|date| render_item(r, &date, config, &contact)))
        .collect();

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(out, "<rss version=\"2.0\" xmlns:atom=\"{}\">", ATOM_NS);
    out.push_str("  <channel>\n");
    let _ = writeln!(out, "    <title>{}</title>", partial_escape(config.title.as_str()));
    let _ = writeln!(out, "    <link>{}</link>", partial_escape(config.link.as_str()));
    let _ = writeln!(
        out,
        "    <description>{}</description>",
        partial_escape(config.description.as_str())
    );
    let _ = writeln!(out, "    <language>{}</language>", partial_escape(config.language.as_str()));
    let _ = writeln!(out, "    <managingEditor>{}</managingEditor>", contact);
    let _ = writeln!(out, "    <webMaster>{}</webMaster>", contact);
    let _ = writeln!(out, "    <lastBuildDate>{}</lastBuildDate>", format_rfc822(&last_build));
    let _ = writeln!(
        out,
        "    <atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\"/>",
        escape(config.self_link())
    );
    out.push_str(&items.join("\n"));
    out.push('\n');
    out.push_str("  </channel>\n");
    out.push_str("</rss>");
    out
}

fn render_item(
    record: &DocumentRecord,
    date: &DateTime<FixedOffset>,
    config: &FeedConfig,
    contact: &str,
) -> String {
    let url = partial_escape(config.item_url(&record.rel_path)).into_owned();
    format!(
        concat!(
            "    <item>\n",
            "      <title>{title}</title>\n",
            "      <link>{url}</link>\n",
            "      <description>{description}</description>\n",
            "      <author>{contact}</author>\n",
            "      <pubDate>{date}</pubDate>\n",
            "      <guid isPermaLink=\"true\">{url}</guid>\n",
            "    </item>",
        ),
        title = partial_escape(record.title.as_str()),
        url = url,
        description = partial_escape(record.description.as_str()),
        contact = contact,
        date = format_rfc822(date),
    )
}

// ── Tests ──
