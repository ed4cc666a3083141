//! Static book table for the upstream site (AELF-style codes, French names).
//!
//! Aliases are written in any case/accent form; the registry folds them into
//! lookup keys. For numbered books the aliases are stems: the registry
//! combines each stem with the numeral in both orders ("1 timothee",
//! "timothee 1"), so the stem alone never names a single book.

pub struct BookEntry {
    pub code: &'static str,
    pub name: &'static str,
    pub first_chapter: u32,
    pub chapter_count: u32,
    pub numeral: Option<u8>,
    pub aliases: &'static [&'static str],
}

const fn book(
    code: &'static str,
    name: &'static str,
    chapter_count: u32,
    aliases: &'static [&'static str],
) -> BookEntry {
    BookEntry {
        code,
        name,
        first_chapter: 1,
        chapter_count,
        numeral: None,
        aliases,
    }
}

const fn numbered(
    numeral: u8,
    code: &'static str,
    name: &'static str,
    chapter_count: u32,
    stems: &'static [&'static str],
) -> BookEntry {
    BookEntry {
        code,
        name,
        first_chapter: 1,
        chapter_count,
        numeral: Some(numeral),
        aliases: stems,
    }
}

const SAMUEL: &[&str] = &["samuel", "sam", "s"];
const ROIS: &[&str] = &["rois", "r"];
const CHRONIQUES: &[&str] = &["chroniques", "chronique", "chron", "ch"];
const MACCABEES: &[&str] = &["maccabées", "macc", "m"];
const CORINTHIENS: &[&str] = &["corinthiens", "cor", "co"];
const THESSALONICIENS: &[&str] = &["thessaloniciens", "thess", "th"];
const TIMOTHEE: &[&str] = &["timothée", "tim", "tm"];
const PIERRE: &[&str] = &["pierre", "p"];
const JEAN: &[&str] = &["jean", "jn"];

pub static BOOKS: &[BookEntry] = &[
    book("Gn", "Genèse", 50, &["genèse", "gen", "gn"]),
    book("Ex", "Exode", 40, &["exode", "ex"]),
    book("Lv", "Lévitique", 27, &["lévitique", "lev", "lv"]),
    book("Nb", "Nombres", 36, &["nombres", "nomb", "nb"]),
    book("Dt", "Deutéronome", 34, &["deutéronome", "deut", "dt"]),
    book("Jos", "Josué", 24, &["josué", "jos"]),
    book("Jg", "Juges", 21, &["juges", "jg"]),
    book("Rt", "Ruth", 4, &["ruth", "rt"]),
    numbered(1, "1S", "1 Samuel", 31, SAMUEL),
    numbered(2, "2S", "2 Samuel", 24, SAMUEL),
    numbered(1, "1R", "1 Rois", 22, ROIS),
    numbered(2, "2R", "2 Rois", 25, ROIS),
    numbered(1, "1Ch", "1 Chroniques", 29, CHRONIQUES),
    numbered(2, "2Ch", "2 Chroniques", 36, CHRONIQUES),
    book("Esd", "Esdras", 10, &["esdras", "esd"]),
    book("Ne", "Néhémie", 13, &["néhémie", "ne"]),
    book("Tb", "Tobie", 14, &["tobie", "tb"]),
    book("Jdt", "Judith", 16, &["judith", "jdt"]),
    book("Est", "Esther", 10, &["esther", "est"]),
    numbered(1, "1M", "1 Maccabées", 16, MACCABEES),
    numbered(2, "2M", "2 Maccabées", 15, MACCABEES),
    book("Jb", "Job", 42, &["job", "jb"]),
    book("Ps", "Psaumes", 150, &["psaumes", "psaume", "ps"]),
    book("Pr", "Proverbes", 31, &["proverbes", "prov", "pr"]),
    book("Qo", "Qohèleth", 12, &["qohèleth", "qohelet", "ecclésiaste", "qo"]),
    book("Ct", "Cantique des cantiques", 8, &["cantique des cantiques", "cantique", "ct"]),
    book("Sg", "Sagesse", 19, &["sagesse", "sg"]),
    // Ben Sira opens with a prologue published as chapter 0.
    BookEntry {
        code: "Si",
        name: "Ben Sira le Sage",
        first_chapter: 0,
        chapter_count: 51,
        numeral: None,
        aliases: &["ben sira", "siracide", "ecclésiastique", "si"],
    },
    book("Is", "Isaïe", 66, &["isaïe", "is"]),
    book("Jr", "Jérémie", 52, &["jérémie", "jer", "jr"]),
    book("Lm", "Lamentations", 5, &["lamentations", "lam", "lm"]),
    book("Ba", "Baruch", 6, &["baruch", "ba"]),
    book("Ez", "Ézékiel", 48, &["ézékiel", "ézéchiel", "ezekiel", "ez"]),
    book("Dn", "Daniel", 14, &["daniel", "dan", "dn"]),
    book("Os", "Osée", 14, &["osée", "os"]),
    book("Jl", "Joël", 4, &["joël", "jl"]),
    book("Am", "Amos", 9, &["amos", "am"]),
    book("Ab", "Abdias", 1, &["abdias", "ab"]),
    book("Jon", "Jonas", 4, &["jonas", "jon"]),
    book("Mi", "Michée", 7, &["michée", "mi"]),
    book("Na", "Nahum", 3, &["nahum", "na"]),
    book("Ha", "Habaquc", 3, &["habaquc", "habacuc", "ha"]),
    book("So", "Sophonie", 3, &["sophonie", "so"]),
    book("Ag", "Aggée", 2, &["aggée", "ag"]),
    book("Za", "Zacharie", 14, &["zacharie", "za"]),
    book("Ml", "Malachie", 3, &["malachie", "ml"]),
    book("Mt", "Matthieu", 28, &["matthieu", "mat", "mt"]),
    book("Mc", "Marc", 16, &["marc", "mc"]),
    book("Lc", "Luc", 24, &["luc", "lc"]),
    book("Jn", "Jean", 21, &["jean", "jn"]),
    book("Ac", "Actes des Apôtres", 28, &["actes des apôtres", "actes", "ac"]),
    book("Rm", "Romains", 16, &["romains", "rom", "rm"]),
    numbered(1, "1Co", "1 Corinthiens", 16, CORINTHIENS),
    numbered(2, "2Co", "2 Corinthiens", 13, CORINTHIENS),
    book("Ga", "Galates", 6, &["galates", "gal", "ga"]),
    book("Ep", "Éphésiens", 6, &["éphésiens", "eph", "ep"]),
    book("Ph", "Philippiens", 4, &["philippiens", "phil", "ph"]),
    book("Col", "Colossiens", 4, &["colossiens", "col"]),
    numbered(1, "1Th", "1 Thessaloniciens", 5, THESSALONICIENS),
    numbered(2, "2Th", "2 Thessaloniciens", 3, THESSALONICIENS),
    numbered(1, "1Tm", "1 Timothée", 6, TIMOTHEE),
    numbered(2, "2Tm", "2 Timothée", 4, TIMOTHEE),
    book("Tt", "Tite", 3, &["tite", "tt"]),
    book("Phm", "Philémon", 1, &["philémon", "phm"]),
    book("He", "Hébreux", 13, &["hébreux", "heb", "he"]),
    book("Jc", "Jacques", 5, &["jacques", "jc"]),
    numbered(1, "1P", "1 Pierre", 5, PIERRE),
    numbered(2, "2P", "2 Pierre", 3, PIERRE),
    numbered(1, "1Jn", "1 Jean", 5, JEAN),
    numbered(2, "2Jn", "2 Jean", 1, JEAN),
    numbered(3, "3Jn", "3 Jean", 1, JEAN),
    book("Jude", "Jude", 1, &["jude", "jud"]),
    book("Ap", "Apocalypse", 22, &["apocalypse", "apoc", "ap"]),
];
