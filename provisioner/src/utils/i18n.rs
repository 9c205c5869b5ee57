use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock, RwLock};

// Dictionnaires embarqués à la compilation
const LOCALE_EN: &str = include_str!("../../locales/en.json");
const LOCALE_FR: &str = include_str!("../../locales/fr.json");
const LOCALE_ID: &str = include_str!("../../locales/id.json");

// Singleton global thread-safe : Une seule instance pour toute l'app
static TRANSLATOR: OnceLock<Arc<RwLock<Translator>>> = OnceLock::new();

/// Structure interne qui détient les données
pub struct Translator {
    translations: HashMap<String, String>,
    pub current_lang: String,
}

impl Translator {
    fn new() -> Self {
        Self {
            translations: HashMap::new(),
            current_lang: "en".to_string(),
        }
    }

    /// Charge une langue embarquée. Langue inconnue => repli sur l'anglais.
    pub fn load(&mut self, lang: &str) {
        let (lang, content) = match lang {
            "fr" => ("fr", LOCALE_FR),
            "id" => ("id", LOCALE_ID),
            "en" => ("en", LOCALE_EN),
            other => {
                tracing::warn!("⚠️ Langue non supportée : {} (repli sur 'en')", other);
                ("en", LOCALE_EN)
            }
        };
        self.load_from_str(lang, content);
    }

    /// Surcharge depuis un fichier JSON `{"CLE": "texte"}` fourni par l'utilisateur.
    pub fn load_from_path(&mut self, lang: &str, path: &Path) {
        match std::fs::read_to_string(path) {
            Ok(content) => self.load_from_str(lang, &content),
            Err(e) => {
                tracing::error!("❌ Impossible de lire le fichier langue ({:?}): {}", path, e);
            }
        }
    }

    fn load_from_str(&mut self, lang: &str, content: &str) {
        match serde_json::from_str::<HashMap<String, String>>(content) {
            Ok(map) => {
                self.translations = map;
                self.current_lang = lang.to_string();
                tracing::debug!("🌍 Langue chargée : {}", lang);
            }
            Err(e) => {
                tracing::error!("❌ Erreur parsing JSON langue ({}): {}", lang, e);
            }
        }
    }

    pub fn t(&self, key: &str) -> String {
        self.translations
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// Initialise le système global avec une langue cible
pub fn init_i18n(lang: &str) {
    let translator = TRANSLATOR.get_or_init(|| Arc::new(RwLock::new(Translator::new())));

    if let Ok(mut write_guard) = translator.write() {
        write_guard.load(lang);
    }
}

/// Traduit une clé via l'instance globale (la clé elle-même si rien n'est chargé)
pub fn t(key: &str) -> String {
    if let Some(arc) = TRANSLATOR.get() {
        if let Ok(read_guard) = arc.read() {
            return read_guard.t(key);
        }
    }
    key.to_string()
}
