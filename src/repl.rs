//! Interactive search loop: a rustyline-backed REPL over a loaded
//! [`SearchEngine`], with `:top N`/`:window N`/`:clear` directives and
//! terminal highlighting of matched query words in each result's snippet.

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::config::SearchConfig;
use crate::index::{DocCache, SearchEngine, SearchResult, should_highlight};
use crate::pkg::normalize_string;

pub struct SearchApp {
    engine: SearchEngine,
    docs: DocCache,
    top: usize,
    window: usize,
    history_file: std::path::PathBuf,
}

impl SearchApp {
    pub fn new(engine: SearchEngine, config: &SearchConfig) -> Self {
        let history_file = config
            .history_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("itis_search_history.txt"));

        SearchApp {
            engine,
            docs: DocCache::new(&config.raw_dir),
            top: config.top,
            window: config.window,
            history_file,
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        println!(
            "{}",
            "Поисковая система запущена. Введите запрос (или 'exit' для выхода):".cyan()
        );
        println!("{}", "Доступные команды: :top N, :window N, :clear".yellow());

        let mut rl = DefaultEditor::new()?;
        let _ = rl.load_history(&self.history_file);

        loop {
            let line = match rl.readline("Поиск> ") {
                Ok(line) => line,
                Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => break,
                Err(e) => return Err(e.into()),
            };

            let query = line.trim();
            if self.process_query(query, &mut rl) {
                break;
            }
        }

        println!("{}", "Завершение работы.".green());
        Ok(())
    }

    /// Returns whether the REPL should exit.
    fn process_query(&mut self, query: &str, rl: &mut DefaultEditor) -> bool {
        match query {
            "" => return false,
            "exit" => return true,
            ":clear" => {
                let _ = rl.clear_history();
                let _ = rl.save_history(&self.history_file);
                println!("{}", "История очищена".green());
                return false;
            }
            _ => {}
        }

        if let Some(rest) = query.strip_prefix(":top ") {
            self.set_top(rest);
            return false;
        }
        if let Some(rest) = query.strip_prefix(":window ") {
            self.set_window(rest);
            return false;
        }

        let _ = rl.add_history_entry(query);
        let _ = rl.save_history(&self.history_file);
        self.show_results(query);
        false
    }

    fn set_top(&mut self, value: &str) {
        match value.trim().parse::<usize>() {
            Ok(n) => {
                self.top = n;
                println!("{}", format!("Установлено количество результатов: {n}").green());
            }
            Err(_) => println!("{}", "Неверный формат. Используйте: :top N".red()),
        }
    }

    fn set_window(&mut self, value: &str) {
        match value.trim().parse::<usize>() {
            Ok(n) => {
                self.window = n;
                println!("{}", format!("Установлен размер окна сниппета: {n}").green());
            }
            Err(_) => println!("{}", "Неверный формат. Используйте: :window N".red()),
        }
    }

    fn show_results(&self, query: &str) {
        let results = self.engine.search(query, self.top, self.window, &self.docs);
        println!("\nРезультатов по запросу '{query}': {}", results.len());

        let query_words: Vec<String> = normalize_string(query)
            .split_whitespace()
            .map(str::to_string)
            .collect();

        for (i, result) in results.iter().enumerate() {
            print_result(i + 1, result, &query_words);
        }
    }
}

fn print_result(position: usize, result: &SearchResult, query_words: &[String]) {
    let highlighted = highlight_snippet(&result.snippet, query_words);

    println!(
        "{}",
        format!(
            "{position}. Документ {} (релевантность: {:.2})",
            result.doc_id, result.score
        )
        .blue()
    );
    println!("   Сниппет: {highlighted}");
    println!("{}", format!("   {}", "─".repeat(60)).white());
}

fn highlight_snippet(snippet: &str, query_words: &[String]) -> String {
    snippet
        .split_whitespace()
        .map(|word| {
            let normalized = normalize_string(word);
            if query_words.iter().any(|q| should_highlight(&normalized, q)) {
                word.yellow().to_string()
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
