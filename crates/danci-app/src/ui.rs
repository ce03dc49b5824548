use danci_types::{AppEvent, CandidateRecord, DetailRecord, SavedEntry, UsageRegister};
use kanal::{AsyncReceiver, AsyncSender};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

/// Line-based interface: commands in, rendered records out.
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    println!("danci — 調べたい中国語を入力（use N / save / list / open N / del ID / quit）");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            event = app_to_ui_rx.recv() => render(event?),
            line = lines.next_line() => {
                let Some(line) = line? else { return Ok(()) };
                if !dispatch(&ui_to_app_tx, line.trim()).await? {
                    return Ok(());
                }
            }
        }
    }
}

/// Maps one input line to an event. Returns false when the user asked to
/// quit.
pub(crate) async fn dispatch(tx: &AsyncSender<AppEvent>, line: &str) -> anyhow::Result<bool> {
    if line.is_empty() {
        return Ok(true);
    }

    let (command, rest) = match line.split_once(' ') {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let event = match command {
        "quit" | "exit" => return Ok(false),
        "use" => match rest.parse::<usize>() {
            Ok(n) if n > 0 => AppEvent::SelectCandidate(n - 1),
            _ => {
                println!("usage: use N");
                return Ok(true);
            }
        },
        "open" => match rest.parse::<usize>() {
            Ok(n) if n > 0 => AppEvent::OpenSaved(n - 1),
            _ => {
                println!("usage: open N");
                return Ok(true);
            }
        },
        "del" if !rest.is_empty() => AppEvent::DeleteSaved(rest.to_string()),
        "save" => AppEvent::SaveCurrent,
        "list" => AppEvent::ListSaved,
        _ => AppEvent::Search(line.to_string()),
    };

    tx.send(event).await?;
    Ok(true)
}

fn render(event: AppEvent) {
    match event {
        AppEvent::ShowDetail(detail) => render_detail(&detail),
        AppEvent::ShowCandidates(candidates) => render_candidates(&candidates),
        AppEvent::ShowSavedList(entries) => render_saved(&entries),
        AppEvent::Notice(notice) => println!("* {notice}"),
        _ => {}
    }
}

fn render_detail(detail: &DetailRecord) {
    println!("\n{}  [{}]", detail.word, detail.pinyin);

    for meaning in &detail.meanings {
        println!("  ({}) {}", meaning.part_of_speech, meaning.short_definition);
        if !meaning.definition.is_empty() {
            println!("      {}", meaning.definition);
        }
        for example in &meaning.examples {
            println!("      [{}] {}", example.scenario, example.zh);
            println!("          {}", example.jp);
            if let Some(note) = &example.note {
                println!("          ※ {note}");
            }
        }
    }

    if !detail.synonyms.is_empty() {
        println!("  類義語:");
        for synonym in &detail.synonyms {
            println!("    {} [{}] {}", synonym.word, synonym.pinyin, synonym.nuance);
        }
    }

    if !detail.usage_tips.is_empty() {
        println!("  コツ: {}", detail.usage_tips);
    }

    if !detail.summary.is_empty() {
        let tags: Vec<String> = detail.summary.iter().map(|t| format!("#{t}")).collect();
        println!("  {}", tags.join(" "));
    }
}

fn render_candidates(candidates: &[CandidateRecord]) {
    println!("\n候補（use N で選択）:");
    for (i, candidate) in candidates.iter().enumerate() {
        let usage = match candidate.usage {
            UsageRegister::Spoken => "口",
            UsageRegister::Written => "書",
            UsageRegister::Both => "口・書",
        };
        println!(
            "  {}. {} [{}] {} 〔{}〕{}",
            i + 1,
            candidate.zh,
            candidate.pinyin,
            candidate.jp_meaning,
            usage,
            "★".repeat(candidate.recommendation as usize)
        );
    }
}

fn render_saved(entries: &[SavedEntry]) {
    if entries.is_empty() {
        println!("保存された単語はありません。");
        return;
    }

    println!("\n保存した単語 ({}):", entries.len());
    for (i, entry) in entries.iter().enumerate() {
        println!("  {}. {}  (id: {})", i + 1, entry.word, entry.id);
    }
}
