use std::sync::Mutex;

use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};

use serde::Deserialize;
use rs_markov_core::io::{corpus_files, open_corpus};
use rs_markov_core::model::frequency_model::FrequencyModel;
use rs_markov_core::model::sentence_model::{SentenceModel, StartWord};

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	length: Option<usize>,
	seed: Option<String> // -> custom:<word> or none
}

#[derive(Deserialize)]
struct CorpusQuery {
	names: Option<String>
}

struct SharedData {
	model: SentenceModel,
	corpus_names: Vec<String>
}

impl GenerateParams {
	/// Determines the start-word strategy for sentence generation.
	fn start_word(&self) -> Result<StartWord<'_>, String> {
		match &self.seed {
			None => Ok(StartWord::Random),
			Some(s) if s.to_lowercase() == "none" => Ok(StartWord::Random),
			Some(s) if s.to_lowercase().starts_with("custom:") => {
				let value = &s["custom:".len()..];
				if value.is_empty() {
					Err("Custom seed cannot be empty".into())
				} else {
					Ok(StartWord::Custom(value))
				}
			}
			Some(_) => Err("Seed must start with 'custom:' or be 'none'".into()),
		}
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a sentence from the loaded model based on query parameters.
/// Returns the generated sentence as the response body.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let length = query.length.unwrap_or(12);

	let start_word = match query.start_word() {
		Ok(s) => s,
		Err(e) => return HttpResponse::BadRequest().body(e)
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.model.generate(&start_word, length) {
		Ok(sentence) => HttpResponse::Ok().body(sentence),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

#[get("/v1/corpora")]
async fn get_corpora() -> impl Responder {
	match corpus_files("./data", "txt") {
		Ok(files) => HttpResponse::Ok().body(files.join("\n").replace(".txt", "")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora")
	}
}

#[get("/v1/loaded_corpora")]
async fn get_loaded_corpora(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().body(shared_data.corpus_names.join("\n"))
}

#[put("/v1/load_corpora")]
async fn put_corpora(data: web::Data<Mutex<SharedData>>, query: web::Query<CorpusQuery>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};

	let corpus_names: Vec<&str> = query_names
		.split(',')
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.collect();

	let mut counts = FrequencyModel::new();
	for name in &corpus_names {
		let corpus_path = format!("./data/{}.txt", name);
		let reader = match open_corpus(&corpus_path) {
			Ok(r) => r,
			Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to open corpus: {e}"))
		};
		let partial_counts = match FrequencyModel::from_reader(reader) {
			Ok(m) => m,
			Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to read corpus: {e}"))
		};
		match counts.merge(&partial_counts) {
			Ok(_) => (),
			Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to merge corpus: {e}"))
		}
	}

	shared_data.model = match counts.normalize() {
		Ok(m) => m,
		Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to normalize model: {e}"))
	};
	shared_data.corpus_names = corpus_names.iter().map(|s| s.to_string()).collect();

	HttpResponse::Ok().body("Corpora loaded successfully")
}

/// Main entry point for the server.
///
/// Starts with an empty model, wraps it in a `Mutex` for thread safety,
/// and serves the generation and corpus-management endpoints.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Corpora are read from `./data/<name>.txt`.
/// - Generating before loading a corpus reports an empty-model error.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let shared_data = SharedData {
		model: SentenceModel::default(),
		corpus_names: Vec::new()
	};
	let shared_model = web::Data::new(Mutex::new(shared_data));

	HttpServer::new(move || {
		App::new()
			.app_data(shared_model.clone())
			.service(get_generated)
			.service(get_corpora)
			.service(put_corpora)
			.service(get_loaded_corpora)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
