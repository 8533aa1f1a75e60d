use rand::Rng;

/// Persona conditioning every customer-side completion request.
pub const CUSTOMER_PERSONA: &str = "You are a customer who wants your artworks authenticated. \
You submit a variety of pieces and react naturally to the verdicts you receive. \
Sometimes you submit genuine works, sometimes forgeries. \
You respond emotionally: you are delighted when a piece is ruled genuine, \
and surprised or argumentative when it is ruled fake.";

/// Persona conditioning every expert-side completion request.
pub const EXPERT_PERSONA: &str = "You are an art authentication expert. \
You analyze brushwork, technique, materials, and apparent age to decide whether a piece is genuine or fake. \
You always judge carefully and professionally, and when you are not certain you rule 'suspicious'. \
Your verdict is one of 'genuine', 'fake', or 'suspicious', and you clearly explain the reasons for it.";

const ARTISTS: [&str; 10] = [
    "Van Gogh",
    "Picasso",
    "Monet",
    "Cézanne",
    "Renoir",
    "Manet",
    "Gauguin",
    "Seurat",
    "Matisse",
    "Kandinsky",
];

const PROVENANCE_SOURCES: [&str; 5] = [
    "an auction house",
    "a gallery",
    "a private collector",
    "a museum",
    "a family estate",
];

/// Produce one randomly filled ownership claim for a submission.
///
/// Selection is uniform over four fixed templates; the year template draws
/// from [1800, 2000] inclusive.
pub fn random_claim<R: Rng>(rng: &mut R) -> String {
    let artist = ARTISTS[rng.gen_range(0..ARTISTS.len())];
    let source = PROVENANCE_SOURCES[rng.gen_range(0..PROVENANCE_SOURCES.len())];
    let year: u32 = rng.gen_range(1800..=2000);

    match rng.gen_range(0..4) {
        0 => format!("This piece is a genuine {}. I purchased it at {}.", artist, source),
        1 => format!(
            "This work dates from the {}s. It is a masterpiece handed down through my family.",
            year
        ),
        2 => format!(
            "It has already been examined by an expert. I am certain it is a {}.",
            artist
        ),
        _ => format!(
            "The ownership history of this piece is well documented. It was certified by {}.",
            source
        ),
    }
}

pub fn submission_prompt(turn: u32, claim: &str) -> String {
    format!(
        "Artwork submission scenario (turn {}): {}\n\n\
         Write the message you would send to submit this piece for authentication. \
         Keep it brief and natural.",
        turn, claim
    )
}

pub fn reaction_prompt(verdict: &str, reasoning: &str) -> String {
    format!(
        "Verdict: {}\nVerdict reasoning: {}\n\n\
         Write your natural reaction to this verdict. React emotionally.",
        verdict, reasoning
    )
}

pub fn verification_prompt(customer_message: &str) -> String {
    format!(
        "Customer message: {}\n\n\
         Please authenticate this piece. Answer with exactly one verdict, \
         'genuine', 'fake', or 'suspicious', and briefly explain your reasoning.\n\
         Format: [verdict] reasoning",
        customer_message
    )
}
