use std::path::Path;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, put, web};

use serde::Deserialize;

use nonsense_core::io::list_files;
use nonsense_core::model::author::Author;
use nonsense_core::model::generation_input::GenerationInput;
use nonsense_core::model::profile::StatisticalProfile;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	words: Option<usize>,
	seed: Option<u64>,
	new_word_chance: Option<f64>,
	matched_chance: Option<f64>,
}

#[derive(Deserialize)]
struct CorpusQuery {
	name: Option<String>,
}

struct SharedData {
	profile: StatisticalProfile,
}

impl GenerateParams {
	/// Builds the generation input for one request.
	fn generation_input(&self) -> Result<GenerationInput, String> {
		let mut input = GenerationInput::default();
		input.seed = self.seed;
		if let Some(chance) = self.new_word_chance {
			input.set_new_word_chance(chance).map_err(|e| e.to_string())?;
		}
		if let Some(chance) = self.matched_chance {
			input.set_matched_chance(chance).map_err(|e| e.to_string())?;
		}
		Ok(input)
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Writes a novel of the requested number of word-units using the loaded
/// profile. Each request runs its own session over a copy of the profile,
/// so concurrent requests never share samplers.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let words = query.words.unwrap_or(500);

	let input = match query.generation_input() {
		Ok(input) => input,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	let profile = match data.lock() {
		Ok(shared_data) => shared_data.profile.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Profile lock failed"),
	};

	let mut author = Author::new(profile, input);
	let mut output = Vec::new();
	match author.write(words, &mut output) {
		Ok(_) => (),
		Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
	}

	match String::from_utf8(output) {
		Ok(text) => HttpResponse::Ok().body(text),
		Err(_) => HttpResponse::InternalServerError().body("Generated text is not valid UTF-8"),
	}
}

/// HTTP GET endpoint `/v1/corpora`
///
/// Lists the corpus files available for loading.
#[get("/v1/corpora")]
async fn get_corpora() -> impl Responder {
	match list_files(&"./data".to_owned(), "txt") {
		Ok(files) => HttpResponse::Ok().body(files.join("\n").replace(".txt", "")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora"),
	}
}

/// HTTP GET endpoint `/v1/profile`
///
/// Returns a dump of the currently loaded profile.
#[get("/v1/profile")]
async fn get_profile(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Profile lock failed"),
	};
	HttpResponse::Ok().body(shared_data.profile.to_string())
}

/// HTTP PUT endpoint `/v1/load_corpus`
///
/// Analyzes `./data/<name>.txt` and installs the resulting profile for
/// subsequent `/v1/generate` calls.
#[put("/v1/load_corpus")]
async fn put_corpus(data: web::Data<Mutex<SharedData>>, query: web::Query<CorpusQuery>) -> impl Responder {
	let name = match &query.name {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};

	let corpus_path = format!("./data/{}.txt", name);
	if !Path::new(&corpus_path).is_file() {
		return HttpResponse::BadRequest().body(format!("No corpus at {}", corpus_path));
	}

	let profile = StatisticalProfile::from_corpus(&corpus_path);

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Profile lock failed"),
	};
	shared_data.profile = profile;

	HttpResponse::Ok().body("Corpus loaded successfully")
}

/// Main entry point for the server.
///
/// Starts with the built-in default profile, wraps it in a `Mutex` for
/// thread safety, and serves the generation endpoints.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Corpora are read from the `./data` directory.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let shared_data = SharedData {
		profile: StatisticalProfile::default(),
	};
	let shared_profile = web::Data::new(Mutex::new(shared_data));

	log::info!("listening on 127.0.0.1:5000");
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_profile.clone())
			.service(get_generated)
			.service(get_corpora)
			.service(get_profile)
			.service(put_corpus)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
