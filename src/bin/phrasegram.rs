extern crate clap;

use clap::{App, Arg, ArgMatches, SubCommand};
use rayon::prelude::*;
use serde_json::json;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::time::SystemTime;

use log::info;

use phrasegram::*;

struct OutputParams {
    search_type: SearchType,
    combine_with: WordType,
    max_results: usize,
    json: bool,
}

fn output_results_as_tsv(input: &str, results: &[PartialAnagram]) {
    for anagram in results {
        println!("{}\t{}\t{}", input, anagram.terms_text(), anagram.anagram_text());
    }
}

fn output_results_as_json(input: &str, results: &[PartialAnagram], seqnr: usize) {
    if seqnr > 1 {
        println!(",");
    }
    let results: Vec<_> = results
        .iter()
        .map(|anagram| {
            json!({
                "terms": anagram.terms_text(),
                "anagram": anagram.anagram_text(),
                "glosses": anagram.words.iter().map(|word| word.gloss.as_str()).collect::<Vec<_>>(),
            })
        })
        .collect();
    let output = json!({ "input": input, "anagrams": results });
    print!("    {}", serde_json::to_string(&output).expect("serializing output"));
}

fn output(input: &str, results: &[PartialAnagram], json: bool, seqnr: usize) {
    if json {
        output_results_as_json(input, results, seqnr);
    } else {
        output_results_as_tsv(input, results);
    }
}

fn run_query(model: &AnagramModel, input: &str, params: &OutputParams) -> Vec<PartialAnagram> {
    model
        .search_with(input, params.search_type, params.combine_with)
        .take(params.max_results)
        .collect()
}

fn process(model: &AnagramModel, inputstream: impl Read, params: &OutputParams, single_thread: bool, progress: bool, seqnr: &mut usize) {
    let f_buffer = BufReader::new(inputstream);
    let inputs: Vec<String> = f_buffer
        .lines()
        .filter_map(|line| line.ok())
        .filter(|line| !line.trim().is_empty())
        .collect();
    let begintime = SystemTime::now();

    //every query is independent, the model is shared read-only
    let results: Vec<Vec<PartialAnagram>> = if single_thread {
        inputs.iter().map(|input| run_query(model, input, params)).collect()
    } else {
        inputs.par_iter().map(|input| run_query(model, input, params)).collect()
    };

    for (input, results) in inputs.iter().zip(results.iter()) {
        *seqnr += 1;
        output(input, results, params.json, *seqnr);
    }
    if progress {
        show_progress(inputs.len(), begintime);
    }
}

fn show_progress(count: usize, begintime: SystemTime) {
    let elapsed = SystemTime::now()
        .duration_since(begintime)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    if elapsed > 0 {
        let rate = count as f64 / (elapsed as f64 / 1000.0);
        info!("Processed {} queries in {} ms ({:.1} queries per second)", count, elapsed, rate);
    } else {
        info!("Processed {} queries", count);
    }
}

///Reads queries from standard input and shows one page at a time; a line containing only
///`+` shows the next page of the previous query.
fn interactive(model: &AnagramModel, params: &OutputParams, page_size: usize, cache_size: usize) {
    let cache = SearchCache::new(model, cache_size);
    let stdin = io::stdin();
    let mut current: Option<(String, usize)> = None;
    eprintln!("(enter a name or phrase, or + for the next page)");
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (query, page) = match (line, current.take()) {
            ("+", Some((query, page))) => (query, page + 1),
            ("+", None) => continue,
            (query, _) => (query.to_string(), 0),
        };
        let results = cache.get(&query, params.search_type, params.combine_with);
        let anagrams = results.page(page, page_size);
        if anagrams.is_empty() {
            eprintln!("(no more results for '{}')", query);
        } else {
            eprintln!("(page {} for '{}')", page + 1, query);
            output_results_as_tsv(&query, &anagrams);
        }
        io::stdout().flush().ok();
        current = Some((query, page));
    }
}

fn output_index(model: &AnagramModel) {
    for word_type in WordType::ALL.iter() {
        let table = model.dictionary.table(*word_type);
        for (key, word) in table.iter() {
            println!("{}\t{}\t{}\t{}", word_type.code(), key, word.text, word.gloss);
        }
    }
}

pub fn common_arguments<'a, 'b>() -> Vec<clap::Arg<'a, 'b>> {
    let mut args: Vec<Arg> = Vec::new();
    args.push(Arg::with_name("dictionary")
        .long("dictionary")
        .short("d")
        .help("Dictionary file: tab separated with one entry per line, containing a category code (n,j,v,a,f,l), the word, its anagram key and optionally a gloss")
        .takes_value(true)
        .required(true));
    args.push(Arg::with_name("strict")
        .long("strict")
        .help("Fail on malformed dictionary lines rather than skipping them")
        .required(false));
    args.push(Arg::with_name("mode")
        .long("mode")
        .short("m")
        .help("Search mode: dynamic (guess from the input), phrase or name")
        .takes_value(true)
        .default_value("dynamic"));
    args.push(Arg::with_name("combine-with")
        .long("combine-with")
        .short("c")
        .help("In phrase or name mode, pair a single input word with every word of this type (noun, adjective, verb, adverb, firstname, lastname)")
        .takes_value(true)
        .default_value("other"));
    args.push(Arg::with_name("max-results")
        .long("max-results")
        .short("n")
        .help("Number of anagrams to return per input")
        .takes_value(true)
        .default_value("100"));
    args.push(Arg::with_name("threshold")
        .long("threshold")
        .help("Single input words shorter than this are paired with a complementary word, longer ones get a full phrase search")
        .takes_value(true)
        .default_value("15"));
    args.push(Arg::with_name("min-word-length")
        .long("min-word-length")
        .help("Shorter dictionary words are not tried for slots other than the last one")
        .takes_value(true)
        .default_value("4"));
    args.push(Arg::with_name("json")
        .long("json")
        .short("j")
        .help("Output json instead of tsv")
        .required(false));
    args
}

fn build_model(args: &ArgMatches) -> AnagramModel {
    let params = SearchParameters::default()
        .with_single_word_threshold(args.value_of("threshold").unwrap_or("15").parse::<usize>().expect("Threshold should be an integer"))
        .with_min_enumerated_word_length(args.value_of("min-word-length").unwrap_or("4").parse::<usize>().expect("Minimum word length should be an integer"));
    let dictionary_params = DictionaryParams { strict: args.is_present("strict") };
    let filename = args.value_of("dictionary").expect("dictionary argument is required");
    match AnagramModel::from_file(filename, &dictionary_params, params) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    }
}

fn output_params(args: &ArgMatches) -> OutputParams {
    OutputParams {
        search_type: args.value_of("mode").unwrap_or("dynamic").parse::<SearchType>().expect("Mode should be dynamic, phrase or name"),
        combine_with: args.value_of("combine-with").unwrap_or("other").parse::<WordType>().expect("Invalid word type to combine with"),
        max_results: args.value_of("max-results").unwrap_or("100").parse::<usize>().expect("Maximum results should be an integer"),
        json: args.is_present("json"),
    }
}

fn main() {
    let rootargs = App::new("Phrasegram")
                    .version("0.1")
                    .about("Finds phrases and names that are anagrams of a name or text")
                    .subcommand(
                        SubCommand::with_name("query")
                            .about("Find anagrams for each line of the input")
                            .args(&common_arguments())
                            .arg(Arg::with_name("single-thread")
                                .long("single-thread")
                                .help("Process the input queries one after another rather than in parallel"))
                            .arg(Arg::with_name("progress")
                                .long("progress")
                                .help("Show progress"))
                            .arg(Arg::with_name("files")
                                .help("Input files, one query per line (use - for standard input)")
                                .takes_value(true)
                                .multiple(true)
                                .required(false))
                    )
                    .subcommand(
                        SubCommand::with_name("interactive")
                            .about("Page through the anagrams of queries entered on standard input")
                            .args(&common_arguments())
                            .arg(Arg::with_name("page-size")
                                .long("page-size")
                                .short("p")
                                .help("Number of anagrams per page")
                                .takes_value(true)
                                .default_value("10"))
                            .arg(Arg::with_name("cache-size")
                                .long("cache-size")
                                .help("Maximum number of queries to keep results for (0 for unlimited)")
                                .takes_value(true)
                                .default_value("1000"))
                    )
                    .subcommand(
                        SubCommand::with_name("index")
                            .about("Output the loaded dictionary with computed anagram keys")
                            .args(&common_arguments())
                    )
                    .arg(Arg::with_name("debug")
                        .long("debug")
                        .short("D")
                        .help("Debug")
                        .required(false))
                    .get_matches();

    let default_level = if rootargs.is_present("debug") { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    if let Some(args) = rootargs.subcommand_matches("query") {
        let model = build_model(args);
        let params = output_params(args);
        let single_thread = args.is_present("single-thread");
        let progress = args.is_present("progress");
        let mut seqnr = 0;
        if params.json {
            println!("[");
        }
        let files: Vec<_> = match args.values_of("files") {
            Some(files) => files.collect(),
            None => vec!["-"],
        };
        for filename in files {
            match filename {
                "-" | "STDIN" | "stdin" => {
                    eprintln!("(accepting standard input; enter input to search, one per line)");
                    process(&model, io::stdin(), &params, single_thread, progress, &mut seqnr);
                }
                _ => {
                    let f = File::open(filename).unwrap_or_else(|e| {
                        eprintln!("ERROR: Unable to open file {}: {}", filename, e);
                        std::process::exit(1);
                    });
                    process(&model, f, &params, single_thread, progress, &mut seqnr);
                }
            }
        }
        if params.json {
            println!("\n]");
        }
    } else if let Some(args) = rootargs.subcommand_matches("interactive") {
        let model = build_model(args);
        let params = output_params(args);
        let page_size = args.value_of("page-size").unwrap_or("10").parse::<usize>().expect("Page size should be an integer");
        let cache_size = args.value_of("cache-size").unwrap_or("1000").parse::<usize>().expect("Cache size should be an integer");
        interactive(&model, &params, page_size, cache_size);
    } else if let Some(args) = rootargs.subcommand_matches("index") {
        let model = build_model(args);
        output_index(&model);
    } else {
        eprintln!("No command specified, use --help for usage");
        std::process::exit(2);
    }
}
