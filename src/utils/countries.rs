use std::cmp::Ordering;

use serde::Serialize;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::models::signup::OTHER_COUNTRY;

/// Western Sahara is left out of the selectable list.
pub const EXCLUDED_COUNTRY: &str = "EH";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
}

// ISO 3166-1 alpha-2 codes with their official French names.
const COUNTRY_NAMES: &[(&str, &str)] = &[
    ("AF", "Afghanistan"),
    ("AL", "Albanie"),
    ("AQ", "Antarctique"),
    ("DZ", "Algérie"),
    ("AS", "Samoa américaines"),
    ("AD", "Andorre"),
    ("AO", "Angola"),
    ("AI", "Anguilla"),
    ("AG", "Antigua-et-Barbuda"),
    ("AR", "Argentine"),
    ("AM", "Arménie"),
    ("AW", "Aruba"),
    ("AU", "Australie"),
    ("AT", "Autriche"),
    ("AZ", "Azerbaïdjan"),
    ("BS", "Bahamas"),
    ("BH", "Bahreïn"),
    ("BD", "Bangladesh"),
    ("BB", "Barbade"),
    ("BY", "Biélorussie"),
    ("BE", "Belgique"),
    ("BZ", "Belize"),
    ("BJ", "Bénin"),
    ("BM", "Bermudes"),
    ("BT", "Bhoutan"),
    ("BO", "Bolivie"),
    ("BA", "Bosnie-Herzégovine"),
    ("BW", "Botswana"),
    ("BV", "Île Bouvet"),
    ("BR", "Brésil"),
    ("IO", "Territoire britannique de l'océan Indien"),
    ("BN", "Brunei Darussalam"),
    ("BG", "Bulgarie"),
    ("BF", "Burkina Faso"),
    ("BI", "Burundi"),
    ("KH", "Cambodge"),
    ("CM", "Cameroun"),
    ("CA", "Canada"),
    ("CV", "Cap-Vert"),
    ("KY", "Îles Caïmans"),
    ("CF", "République centrafricaine"),
    ("TD", "Tchad"),
    ("CL", "Chili"),
    ("CN", "Chine"),
    ("CX", "Île Christmas"),
    ("CC", "Îles Cocos"),
    ("CO", "Colombie"),
    ("KM", "Comores"),
    ("CG", "République du Congo"),
    ("CD", "République démocratique du Congo"),
    ("CK", "Îles Cook"),
    ("CR", "Costa Rica"),
    ("CI", "Côte d'Ivoire"),
    ("HR", "Croatie"),
    ("CU", "Cuba"),
    ("CY", "Chypre"),
    ("CZ", "République tchèque"),
    ("DK", "Danemark"),
    ("DJ", "Djibouti"),
    ("DM", "Dominique"),
    ("DO", "République dominicaine"),
    ("EC", "Équateur"),
    ("EG", "Égypte"),
    ("SV", "Salvador"),
    ("GQ", "Guinée équatoriale"),
    ("ER", "Érythrée"),
    ("EE", "Estonie"),
    ("ET", "Éthiopie"),
    ("FK", "Îles Malouines"),
    ("FO", "Îles Féroé"),
    ("FJ", "Fidji"),
    ("FI", "Finlande"),
    ("FR", "France"),
    ("GF", "Guyane française"),
    ("PF", "Polynésie française"),
    ("TF", "Terres australes et antarctiques françaises"),
    ("GA", "Gabon"),
    ("GM", "Gambie"),
    ("GE", "Géorgie"),
    ("DE", "Allemagne"),
    ("GH", "Ghana"),
    ("GI", "Gibraltar"),
    ("GR", "Grèce"),
    ("GL", "Groenland"),
    ("GD", "Grenade"),
    ("GP", "Guadeloupe"),
    ("GU", "Guam"),
    ("GT", "Guatemala"),
    ("GN", "Guinée"),
    ("GW", "Guinée-Bissau"),
    ("GY", "Guyana"),
    ("HT", "Haïti"),
    ("HM", "Îles Heard-et-MacDonald"),
    ("VA", "Saint-Siège (état de la Cité du Vatican)"),
    ("HN", "Honduras"),
    ("HK", "Hong Kong"),
    ("HU", "Hongrie"),
    ("IS", "Islande"),
    ("IN", "Inde"),
    ("ID", "Indonésie"),
    ("IR", "Iran"),
    ("IQ", "Irak"),
    ("IE", "Irlande"),
    ("IL", "Israël"),
    ("IT", "Italie"),
    ("JM", "Jamaïque"),
    ("JP", "Japon"),
    ("JO", "Jordanie"),
    ("KZ", "Kazakhstan"),
    ("KE", "Kenya"),
    ("KI", "Kiribati"),
    ("KP", "Corée du Nord"),
    ("KR", "Corée du Sud"),
    ("KW", "Koweït"),
    ("KG", "Kirghizistan"),
    ("LA", "Laos"),
    ("LV", "Lettonie"),
    ("LB", "Liban"),
    ("LS", "Lesotho"),
    ("LR", "Liberia"),
    ("LY", "Libye"),
    ("LI", "Liechtenstein"),
    ("LT", "Lituanie"),
    ("LU", "Luxembourg"),
    ("MO", "Macao"),
    ("MK", "Macédoine du Nord"),
    ("MG", "Madagascar"),
    ("MW", "Malawi"),
    ("MY", "Malaisie"),
    ("MV", "Maldives"),
    ("ML", "Mali"),
    ("MT", "Malte"),
    ("MH", "Îles Marshall"),
    ("MQ", "Martinique"),
    ("MR", "Mauritanie"),
    ("MU", "Maurice"),
    ("YT", "Mayotte"),
    ("MX", "Mexique"),
    ("FM", "Micronésie"),
    ("MD", "Moldavie"),
    ("MC", "Monaco"),
    ("MN", "Mongolie"),
    ("MS", "Montserrat"),
    ("MA", "Maroc"),
    ("MZ", "Mozambique"),
    ("MM", "Myanmar"),
    ("NA", "Namibie"),
    ("NR", "Nauru"),
    ("NP", "Népal"),
    ("NL", "Pays-Bas"),
    ("NC", "Nouvelle-Calédonie"),
    ("NZ", "Nouvelle-Zélande"),
    ("NI", "Nicaragua"),
    ("NE", "Niger"),
    ("NG", "Nigéria"),
    ("NU", "Niué"),
    ("NF", "Île Norfolk"),
    ("MP", "Îles Mariannes du Nord"),
    ("NO", "Norvège"),
    ("OM", "Oman"),
    ("PK", "Pakistan"),
    ("PW", "Palaos"),
    ("PS", "Palestine"),
    ("PA", "Panama"),
    ("PG", "Papouasie-Nouvelle-Guinée"),
    ("PY", "Paraguay"),
    ("PE", "Pérou"),
    ("PH", "Philippines"),
    ("PN", "Îles Pitcairn"),
    ("PL", "Pologne"),
    ("PT", "Portugal"),
    ("PR", "Porto Rico"),
    ("QA", "Qatar"),
    ("RE", "Réunion"),
    ("RO", "Roumanie"),
    ("RU", "Russie"),
    ("RW", "Rwanda"),
    ("SH", "Sainte-Hélène"),
    ("KN", "Saint-Christophe-et-Niévès"),
    ("LC", "Sainte-Lucie"),
    ("PM", "Saint-Pierre-et-Miquelon"),
    ("VC", "Saint-Vincent-et-les-Grenadines"),
    ("WS", "Samoa"),
    ("SM", "Saint-Marin"),
    ("ST", "Sao Tomé-et-Principe"),
    ("SA", "Arabie saoudite"),
    ("SN", "Sénégal"),
    ("SC", "Seychelles"),
    ("SL", "Sierra Leone"),
    ("SG", "Singapour"),
    ("SK", "Slovaquie"),
    ("SI", "Slovénie"),
    ("SB", "Îles Salomon"),
    ("SO", "Somalie"),
    ("ZA", "Afrique du Sud"),
    ("GS", "Géorgie du Sud-et-les Îles Sandwich du Sud"),
    ("ES", "Espagne"),
    ("LK", "Sri Lanka"),
    ("SD", "Soudan"),
    ("SR", "Suriname"),
    ("SJ", "Svalbard et Île Jan Mayen"),
    ("SZ", "Eswatini"),
    ("SE", "Suède"),
    ("CH", "Suisse"),
    ("SY", "Syrie"),
    ("TW", "Taïwan"),
    ("TJ", "Tadjikistan"),
    ("TZ", "Tanzanie"),
    ("TH", "Thaïlande"),
    ("TL", "Timor oriental"),
    ("TG", "Togo"),
    ("TK", "Tokelau"),
    ("TO", "Tonga"),
    ("TT", "Trinité-et-Tobago"),
    ("TN", "Tunisie"),
    ("TR", "Turquie"),
    ("TM", "Turkménistan"),
    ("TC", "Îles Turques-et-Caïques"),
    ("TV", "Tuvalu"),
    ("UG", "Ouganda"),
    ("UA", "Ukraine"),
    ("AE", "Émirats arabes unis"),
    ("GB", "Royaume-Uni"),
    ("US", "États-Unis d'Amérique"),
    ("UM", "Îles mineures éloignées des États-Unis"),
    ("UY", "Uruguay"),
    ("UZ", "Ouzbékistan"),
    ("VU", "Vanuatu"),
    ("VE", "Venezuela"),
    ("VN", "Viêt Nam"),
    ("VG", "Îles Vierges britanniques"),
    ("VI", "Îles Vierges des États-Unis"),
    ("WF", "Wallis-et-Futuna"),
    ("EH", "Sahara occidental"),
    ("YE", "Yémen"),
    ("ZM", "Zambie"),
    ("ZW", "Zimbabwe"),
    ("AX", "Îles Åland"),
    ("BQ", "Pays-Bas caribéens"),
    ("CW", "Curaçao"),
    ("GG", "Guernesey"),
    ("IM", "Île de Man"),
    ("JE", "Jersey"),
    ("ME", "Monténégro"),
    ("BL", "Saint-Barthélemy"),
    ("MF", "Saint-Martin (partie française)"),
    ("RS", "Serbie"),
    ("SX", "Saint-Martin (partie néerlandaise)"),
    ("SS", "Soudan du Sud"),
    ("XK", "Kosovo"),
];

// Short list shown before the full catalog; `OTHER` opens the catalog.
const QUICK_PICKS: &[(&str, &str)] = &[
    ("FR", "France"),
    ("BE", "Belgique"),
    ("CH", "Suisse"),
    ("MA", "Maroc"),
    (OTHER_COUNTRY, "Autre"),
];

/// Every selectable country, sorted by French display name.
pub fn selectable_countries() -> Vec<Country> {
    let mut countries: Vec<Country> = COUNTRY_NAMES
        .iter()
        .filter(|(code, _)| *code != EXCLUDED_COUNTRY)
        .map(|&(code, name)| Country { code, name })
        .collect();

    countries.sort_by(|a, b| french_collate(a.name, b.name));
    countries
}

pub fn quick_picks() -> Vec<Country> {
    QUICK_PICKS
        .iter()
        .map(|&(code, name)| Country { code, name })
        .collect()
}

pub fn display_name(code: &str) -> Option<&'static str> {
    COUNTRY_NAMES
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}

/// Accent- and case-insensitive first pass, raw text as tie-breaker, which
/// is how a French reader expects "Égypte" to sit among the E's.
pub fn french_collate(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(value: &str) -> String {
    value
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .collect()
}
