//! Word lists backing the rule-based recognizer.
//!
//! All entries are lowercase; lookups lowercase the candidate first.

use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    /// Countries, states, regions and large cities.
    pub static ref PLACES: HashSet<&'static str> = [
        // countries
        "afghanistan", "argentina", "australia", "austria", "bangladesh", "belgium", "brazil",
        "canada", "chile", "china", "colombia", "cuba", "czechia", "denmark", "egypt",
        "england", "ethiopia", "finland", "france", "germany", "ghana", "greece", "hungary",
        "iceland", "india", "indonesia", "iran", "iraq", "ireland", "israel", "italy",
        "jamaica", "japan", "jordan", "kenya", "korea", "mexico", "morocco", "nepal",
        "netherlands", "new zealand", "nigeria", "north korea", "norway", "pakistan", "peru",
        "philippines", "poland", "portugal", "romania", "russia", "saudi arabia", "scotland",
        "singapore", "south africa", "south korea", "spain", "sri lanka", "sweden",
        "switzerland", "syria", "taiwan", "thailand", "turkey", "uganda", "ukraine",
        "united kingdom", "united states", "uk", "us", "usa", "u.s", "u.k", "vietnam", "wales",
        // states and regions
        "alabama", "alaska", "arizona", "california", "colorado", "connecticut", "florida",
        "georgia", "hawaii", "idaho", "illinois", "indiana", "iowa", "kansas", "kentucky",
        "louisiana", "maine", "maryland", "massachusetts", "michigan", "minnesota",
        "mississippi", "missouri", "montana", "nebraska", "nevada", "new jersey",
        "new mexico", "new york", "north carolina", "ohio", "oklahoma", "oregon",
        "pennsylvania", "texas", "utah", "vermont", "virginia", "washington", "wisconsin",
        "wyoming", "bavaria", "catalonia", "ontario", "quebec", "europe", "asia", "africa",
        "antarctica", "north america", "south america", "silicon valley", "bay area",
        // cities
        "amsterdam", "athens", "atlanta", "austin", "bangalore", "bangkok", "barcelona",
        "beijing", "berlin", "bogota", "boston", "brussels", "budapest", "buenos aires",
        "cairo", "chicago", "copenhagen", "dallas", "delhi", "denver", "dubai", "dublin",
        "edinburgh", "hamburg", "helsinki", "hong kong", "houston", "istanbul", "jakarta",
        "jerusalem", "johannesburg", "kyiv", "lagos", "las vegas", "lisbon", "london",
        "los angeles", "madrid", "manchester", "melbourne", "miami", "milan", "montreal",
        "moscow", "mumbai", "munich", "nairobi", "new delhi", "new orleans", "new york city",
        "oakland", "oslo", "paris", "philadelphia", "phoenix", "portland", "prague",
        "rome", "san diego", "san francisco", "san jose", "santiago", "sao paulo", "seattle",
        "seoul", "shanghai", "stockholm", "sydney", "tel aviv", "tokyo", "toronto",
        "vancouver", "vienna", "warsaw", "zurich", "zürich",
    ]
    .into_iter()
    .collect();

    /// Well-known companies and institutions.
    pub static ref ORGANIZATIONS: HashSet<&'static str> = [
        "adobe", "airbnb", "alibaba", "amazon", "anthropic", "apple", "atlassian", "baidu",
        "boeing", "cisco", "cloudflare", "coinbase", "databricks", "deloitte", "dell",
        "deepmind", "disney", "dropbox", "facebook", "ford", "github", "gitlab", "google",
        "harvard", "huawei", "ibm", "instagram", "intel", "linkedin", "meta", "microsoft",
        "mit", "mozilla", "netflix", "nvidia", "openai", "oracle", "paypal", "pfizer",
        "reddit", "salesforce", "samsung", "shopify", "siemens", "slack", "sony", "spotify",
        "stanford", "tesla", "tiktok", "toyota", "twitter", "uber", "walmart", "yahoo",
        "youtube", "zoom", "united nations", "european union", "white house", "congress",
        "senate", "parliament",
    ]
    .into_iter()
    .collect();

    /// Trailing words that mark a capitalized run as an organization.
    pub static ref ORGANIZATION_SUFFIXES: HashSet<&'static str> = [
        "inc", "inc.", "corp", "corp.", "corporation", "co", "co.", "company", "ltd", "ltd.",
        "llc", "plc", "gmbh", "ag", "sa", "group", "holdings", "partners", "labs", "bank",
        "university", "college", "institute", "foundation", "association", "agency",
        "ministry", "department", "committee", "council", "school", "hospital", "club",
    ]
    .into_iter()
    .collect();

    /// Weekday and month names.
    pub static ref CALENDAR_WORDS: HashSet<&'static str> = [
        "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
        "january", "february", "march", "april", "june", "july", "august", "september",
        "october", "november", "december",
    ]
    .into_iter()
    .collect();

    /// Honorifics that end in a period without ending a sentence.
    pub static ref TITLES: HashSet<&'static str> = [
        "mr", "mrs", "ms", "dr", "prof", "sir", "st", "gen", "sen", "rep", "gov", "capt",
    ]
    .into_iter()
    .collect();

    /// Capitalized words that never start or continue an entity.
    pub static ref STOPWORDS: HashSet<&'static str> = [
        "i", "me", "my", "we", "us", "our", "you", "your", "he", "him", "his", "she", "her",
        "it", "its", "they", "them", "their", "this", "that", "these", "those", "there",
        "here", "the", "a", "an", "and", "or", "but", "so", "if", "then", "than", "when",
        "where", "what", "which", "who", "whom", "why", "how", "is", "are", "was", "were",
        "be", "been", "do", "does", "did", "done", "have", "has", "had", "will", "would",
        "can", "could", "should", "shall", "may", "might", "must", "let", "lets", "not",
        "no", "yes", "yeah", "yep", "nope", "ok", "okay", "hi", "hello", "hey", "thanks",
        "thank", "please", "sorry", "sure", "well", "also", "just", "maybe", "all", "any",
        "some", "every", "each", "both", "either", "neither", "one", "on", "in", "at", "to",
        "for", "from", "with", "without", "by", "of", "about", "after", "before", "since",
        "until", "while", "during", "today", "tomorrow", "yesterday", "tonight", "now",
        "great", "good", "nice", "cool", "fine", "lol", "tbh", "btw", "imo", "fyi", "asap",
        "ceo", "cto", "cfo", "coo", "vp", "am", "pm", "mr", "mrs", "ms", "dr", "prof",
    ]
    .into_iter()
    .collect();
}
