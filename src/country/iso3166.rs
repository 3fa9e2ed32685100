// 🌍 ISO 3166-1 country table
// Canonical names as published by the ISO registry, with the official and
// common names that fuzzy search also considers.

/// One entry of the ISO 3166-1 registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code (uppercase)
    pub alpha_2: &'static str,

    /// Short name in the registry's canonical spelling
    pub name: &'static str,

    /// Formal state name, e.g. "Republic of Chile"
    pub official_name: Option<&'static str>,

    /// Everyday name where the canonical one is unwieldy, e.g. "Bolivia"
    pub common_name: Option<&'static str>,
}

impl Country {
    const fn new(alpha_2: &'static str, name: &'static str) -> Self {
        Country {
            alpha_2,
            name,
            official_name: None,
            common_name: None,
        }
    }

    const fn official(mut self, official_name: &'static str) -> Self {
        self.official_name = Some(official_name);
        self
    }

    const fn common(mut self, common_name: &'static str) -> Self {
        self.common_name = Some(common_name);
        self
    }

    /// Every name this country answers to, canonical first
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        [Some(self.name), self.official_name, self.common_name]
            .into_iter()
            .flatten()
    }
}

pub static COUNTRIES: &[Country] = &[
    Country::new("AD", "Andorra").official("Principality of Andorra"),
    Country::new("AE", "United Arab Emirates"),
    Country::new("AF", "Afghanistan").official("Islamic Republic of Afghanistan"),
    Country::new("AG", "Antigua and Barbuda"),
    Country::new("AI", "Anguilla"),
    Country::new("AL", "Albania").official("Republic of Albania"),
    Country::new("AM", "Armenia").official("Republic of Armenia"),
    Country::new("AO", "Angola").official("Republic of Angola"),
    Country::new("AQ", "Antarctica"),
    Country::new("AR", "Argentina").official("Argentine Republic"),
    Country::new("AS", "American Samoa"),
    Country::new("AT", "Austria").official("Republic of Austria"),
    Country::new("AU", "Australia"),
    Country::new("AW", "Aruba"),
    Country::new("AX", "Åland Islands"),
    Country::new("AZ", "Azerbaijan").official("Republic of Azerbaijan"),
    Country::new("BA", "Bosnia and Herzegovina").official("Republic of Bosnia and Herzegovina"),
    Country::new("BB", "Barbados"),
    Country::new("BD", "Bangladesh").official("People's Republic of Bangladesh"),
    Country::new("BE", "Belgium").official("Kingdom of Belgium"),
    Country::new("BF", "Burkina Faso"),
    Country::new("BG", "Bulgaria").official("Republic of Bulgaria"),
    Country::new("BH", "Bahrain").official("Kingdom of Bahrain"),
    Country::new("BI", "Burundi").official("Republic of Burundi"),
    Country::new("BJ", "Benin").official("Republic of Benin"),
    Country::new("BL", "Saint Barthélemy"),
    Country::new("BM", "Bermuda"),
    Country::new("BN", "Brunei Darussalam"),
    Country::new("BO", "Bolivia, Plurinational State of")
        .official("Plurinational State of Bolivia")
        .common("Bolivia"),
    Country::new("BQ", "Bonaire, Sint Eustatius and Saba"),
    Country::new("BR", "Brazil").official("Federative Republic of Brazil"),
    Country::new("BS", "Bahamas").official("Commonwealth of the Bahamas"),
    Country::new("BT", "Bhutan").official("Kingdom of Bhutan"),
    Country::new("BV", "Bouvet Island"),
    Country::new("BW", "Botswana").official("Republic of Botswana"),
    Country::new("BY", "Belarus").official("Republic of Belarus"),
    Country::new("BZ", "Belize"),
    Country::new("CA", "Canada"),
    Country::new("CC", "Cocos (Keeling) Islands"),
    Country::new("CD", "Congo, The Democratic Republic of the"),
    Country::new("CF", "Central African Republic"),
    Country::new("CG", "Congo").official("Republic of the Congo"),
    Country::new("CH", "Switzerland").official("Swiss Confederation"),
    Country::new("CI", "Côte d'Ivoire").official("Republic of Côte d'Ivoire"),
    Country::new("CK", "Cook Islands"),
    Country::new("CL", "Chile").official("Republic of Chile"),
    Country::new("CM", "Cameroon").official("Republic of Cameroon"),
    Country::new("CN", "China").official("People's Republic of China"),
    Country::new("CO", "Colombia").official("Republic of Colombia"),
    Country::new("CR", "Costa Rica").official("Republic of Costa Rica"),
    Country::new("CU", "Cuba").official("Republic of Cuba"),
    Country::new("CV", "Cabo Verde").official("Republic of Cabo Verde"),
    Country::new("CW", "Curaçao"),
    Country::new("CX", "Christmas Island"),
    Country::new("CY", "Cyprus").official("Republic of Cyprus"),
    Country::new("CZ", "Czechia").official("Czech Republic"),
    Country::new("DE", "Germany").official("Federal Republic of Germany"),
    Country::new("DJ", "Djibouti").official("Republic of Djibouti"),
    Country::new("DK", "Denmark").official("Kingdom of Denmark"),
    Country::new("DM", "Dominica").official("Commonwealth of Dominica"),
    Country::new("DO", "Dominican Republic"),
    Country::new("DZ", "Algeria").official("People's Democratic Republic of Algeria"),
    Country::new("EC", "Ecuador").official("Republic of Ecuador"),
    Country::new("EE", "Estonia").official("Republic of Estonia"),
    Country::new("EG", "Egypt").official("Arab Republic of Egypt"),
    Country::new("EH", "Western Sahara"),
    Country::new("ER", "Eritrea").official("the State of Eritrea"),
    Country::new("ES", "Spain").official("Kingdom of Spain"),
    Country::new("ET", "Ethiopia").official("Federal Democratic Republic of Ethiopia"),
    Country::new("FI", "Finland").official("Republic of Finland"),
    Country::new("FJ", "Fiji").official("Republic of Fiji"),
    Country::new("FK", "Falkland Islands (Malvinas)"),
    Country::new("FM", "Micronesia, Federated States of").official("Federated States of Micronesia"),
    Country::new("FO", "Faroe Islands"),
    Country::new("FR", "France").official("French Republic"),
    Country::new("GA", "Gabon").official("Gabonese Republic"),
    Country::new("GB", "United Kingdom")
        .official("United Kingdom of Great Britain and Northern Ireland"),
    Country::new("GD", "Grenada"),
    Country::new("GE", "Georgia"),
    Country::new("GF", "French Guiana"),
    Country::new("GG", "Guernsey"),
    Country::new("GH", "Ghana").official("Republic of Ghana"),
    Country::new("GI", "Gibraltar"),
    Country::new("GL", "Greenland"),
    Country::new("GM", "Gambia").official("Republic of the Gambia"),
    Country::new("GN", "Guinea").official("Republic of Guinea"),
    Country::new("GP", "Guadeloupe"),
    Country::new("GQ", "Equatorial Guinea").official("Republic of Equatorial Guinea"),
    Country::new("GR", "Greece").official("Hellenic Republic"),
    Country::new("GS", "South Georgia and the South Sandwich Islands"),
    Country::new("GT", "Guatemala").official("Republic of Guatemala"),
    Country::new("GU", "Guam"),
    Country::new("GW", "Guinea-Bissau").official("Republic of Guinea-Bissau"),
    Country::new("GY", "Guyana").official("Republic of Guyana"),
    Country::new("HK", "Hong Kong")
        .official("Hong Kong Special Administrative Region of China"),
    Country::new("HM", "Heard Island and McDonald Islands"),
    Country::new("HN", "Honduras").official("Republic of Honduras"),
    Country::new("HR", "Croatia").official("Republic of Croatia"),
    Country::new("HT", "Haiti").official("Republic of Haiti"),
    Country::new("HU", "Hungary"),
    Country::new("ID", "Indonesia").official("Republic of Indonesia"),
    Country::new("IE", "Ireland"),
    Country::new("IL", "Israel").official("State of Israel"),
    Country::new("IM", "Isle of Man"),
    Country::new("IN", "India").official("Republic of India"),
    Country::new("IO", "British Indian Ocean Territory"),
    Country::new("IQ", "Iraq").official("Republic of Iraq"),
    Country::new("IR", "Iran, Islamic Republic of")
        .official("Islamic Republic of Iran")
        .common("Iran"),
    Country::new("IS", "Iceland").official("Republic of Iceland"),
    Country::new("IT", "Italy").official("Italian Republic"),
    Country::new("JE", "Jersey"),
    Country::new("JM", "Jamaica"),
    Country::new("JO", "Jordan").official("Hashemite Kingdom of Jordan"),
    Country::new("JP", "Japan"),
    Country::new("KE", "Kenya").official("Republic of Kenya"),
    Country::new("KG", "Kyrgyzstan").official("Kyrgyz Republic"),
    Country::new("KH", "Cambodia").official("Kingdom of Cambodia"),
    Country::new("KI", "Kiribati").official("Republic of Kiribati"),
    Country::new("KM", "Comoros").official("Union of the Comoros"),
    Country::new("KN", "Saint Kitts and Nevis"),
    Country::new("KP", "Korea, Democratic People's Republic of")
        .official("Democratic People's Republic of Korea")
        .common("North Korea"),
    Country::new("KR", "Korea, Republic of").common("South Korea"),
    Country::new("KW", "Kuwait").official("State of Kuwait"),
    Country::new("KY", "Cayman Islands"),
    Country::new("KZ", "Kazakhstan").official("Republic of Kazakhstan"),
    Country::new("LA", "Lao People's Democratic Republic").common("Laos"),
    Country::new("LB", "Lebanon").official("Lebanese Republic"),
    Country::new("LC", "Saint Lucia"),
    Country::new("LI", "Liechtenstein").official("Principality of Liechtenstein"),
    Country::new("LK", "Sri Lanka").official("Democratic Socialist Republic of Sri Lanka"),
    Country::new("LR", "Liberia").official("Republic of Liberia"),
    Country::new("LS", "Lesotho").official("Kingdom of Lesotho"),
    Country::new("LT", "Lithuania").official("Republic of Lithuania"),
    Country::new("LU", "Luxembourg").official("Grand Duchy of Luxembourg"),
    Country::new("LV", "Latvia").official("Republic of Latvia"),
    Country::new("LY", "Libya"),
    Country::new("MA", "Morocco").official("Kingdom of Morocco"),
    Country::new("MC", "Monaco").official("Principality of Monaco"),
    Country::new("MD", "Moldova, Republic of")
        .official("Republic of Moldova")
        .common("Moldova"),
    Country::new("ME", "Montenegro"),
    Country::new("MF", "Saint Martin (French part)"),
    Country::new("MG", "Madagascar").official("Republic of Madagascar"),
    Country::new("MH", "Marshall Islands").official("Republic of the Marshall Islands"),
    Country::new("MK", "North Macedonia").official("Republic of North Macedonia"),
    Country::new("ML", "Mali").official("Republic of Mali"),
    Country::new("MM", "Myanmar").official("Republic of Myanmar"),
    Country::new("MN", "Mongolia"),
    Country::new("MO", "Macao").official("Macao Special Administrative Region of China"),
    Country::new("MP", "Northern Mariana Islands")
        .official("Commonwealth of the Northern Mariana Islands"),
    Country::new("MQ", "Martinique"),
    Country::new("MR", "Mauritania").official("Islamic Republic of Mauritania"),
    Country::new("MS", "Montserrat"),
    Country::new("MT", "Malta").official("Republic of Malta"),
    Country::new("MU", "Mauritius").official("Republic of Mauritius"),
    Country::new("MV", "Maldives").official("Republic of Maldives"),
    Country::new("MW", "Malawi").official("Republic of Malawi"),
    Country::new("MX", "Mexico").official("United Mexican States"),
    Country::new("MY", "Malaysia"),
    Country::new("MZ", "Mozambique").official("Republic of Mozambique"),
    Country::new("NA", "Namibia").official("Republic of Namibia"),
    Country::new("NC", "New Caledonia"),
    Country::new("NE", "Niger").official("Republic of the Niger"),
    Country::new("NF", "Norfolk Island"),
    Country::new("NG", "Nigeria").official("Federal Republic of Nigeria"),
    Country::new("NI", "Nicaragua").official("Republic of Nicaragua"),
    Country::new("NL", "Netherlands").official("Kingdom of the Netherlands"),
    Country::new("NO", "Norway").official("Kingdom of Norway"),
    Country::new("NP", "Nepal").official("Federal Democratic Republic of Nepal"),
    Country::new("NR", "Nauru").official("Republic of Nauru"),
    Country::new("NU", "Niue"),
    Country::new("NZ", "New Zealand"),
    Country::new("OM", "Oman").official("Sultanate of Oman"),
    Country::new("PA", "Panama").official("Republic of Panama"),
    Country::new("PE", "Peru").official("Republic of Peru"),
    Country::new("PF", "French Polynesia"),
    Country::new("PG", "Papua New Guinea").official("Independent State of Papua New Guinea"),
    Country::new("PH", "Philippines").official("Republic of the Philippines"),
    Country::new("PK", "Pakistan").official("Islamic Republic of Pakistan"),
    Country::new("PL", "Poland").official("Republic of Poland"),
    Country::new("PM", "Saint Pierre and Miquelon"),
    Country::new("PN", "Pitcairn"),
    Country::new("PR", "Puerto Rico"),
    Country::new("PS", "Palestine, State of").official("the State of Palestine"),
    Country::new("PT", "Portugal").official("Portuguese Republic"),
    Country::new("PW", "Palau").official("Republic of Palau"),
    Country::new("PY", "Paraguay").official("Republic of Paraguay"),
    Country::new("QA", "Qatar").official("State of Qatar"),
    Country::new("RE", "Réunion"),
    Country::new("RO", "Romania"),
    Country::new("RS", "Serbia").official("Republic of Serbia"),
    Country::new("RU", "Russian Federation"),
    Country::new("RW", "Rwanda").official("Rwandese Republic"),
    Country::new("SA", "Saudi Arabia").official("Kingdom of Saudi Arabia"),
    Country::new("SB", "Solomon Islands"),
    Country::new("SC", "Seychelles").official("Republic of Seychelles"),
    Country::new("SD", "Sudan").official("Republic of the Sudan"),
    Country::new("SE", "Sweden").official("Kingdom of Sweden"),
    Country::new("SG", "Singapore").official("Republic of Singapore"),
    Country::new("SH", "Saint Helena, Ascension and Tristan da Cunha"),
    Country::new("SI", "Slovenia").official("Republic of Slovenia"),
    Country::new("SJ", "Svalbard and Jan Mayen"),
    Country::new("SK", "Slovakia").official("Slovak Republic"),
    Country::new("SL", "Sierra Leone").official("Republic of Sierra Leone"),
    Country::new("SM", "San Marino").official("Republic of San Marino"),
    Country::new("SN", "Senegal").official("Republic of Senegal"),
    Country::new("SO", "Somalia").official("Federal Republic of Somalia"),
    Country::new("SR", "Suriname").official("Republic of Suriname"),
    Country::new("SS", "South Sudan").official("Republic of South Sudan"),
    Country::new("ST", "Sao Tome and Principe")
        .official("Democratic Republic of Sao Tome and Principe"),
    Country::new("SV", "El Salvador").official("Republic of El Salvador"),
    Country::new("SX", "Sint Maarten (Dutch part)"),
    Country::new("SY", "Syrian Arab Republic").common("Syria"),
    Country::new("SZ", "Eswatini").official("Kingdom of Eswatini"),
    Country::new("TC", "Turks and Caicos Islands"),
    Country::new("TD", "Chad").official("Republic of Chad"),
    Country::new("TF", "French Southern Territories"),
    Country::new("TG", "Togo").official("Togolese Republic"),
    Country::new("TH", "Thailand").official("Kingdom of Thailand"),
    Country::new("TJ", "Tajikistan").official("Republic of Tajikistan"),
    Country::new("TK", "Tokelau"),
    Country::new("TL", "Timor-Leste").official("Democratic Republic of Timor-Leste"),
    Country::new("TM", "Turkmenistan"),
    Country::new("TN", "Tunisia").official("Republic of Tunisia"),
    Country::new("TO", "Tonga").official("Kingdom of Tonga"),
    Country::new("TR", "Türkiye").official("Republic of Türkiye"),
    Country::new("TT", "Trinidad and Tobago").official("Republic of Trinidad and Tobago"),
    Country::new("TV", "Tuvalu"),
    Country::new("TW", "Taiwan, Province of China").common("Taiwan"),
    Country::new("TZ", "Tanzania, United Republic of")
        .official("United Republic of Tanzania")
        .common("Tanzania"),
    Country::new("UA", "Ukraine"),
    Country::new("UG", "Uganda").official("Republic of Uganda"),
    Country::new("UM", "United States Minor Outlying Islands"),
    Country::new("US", "United States").official("United States of America"),
    Country::new("UY", "Uruguay").official("Eastern Republic of Uruguay"),
    Country::new("UZ", "Uzbekistan").official("Republic of Uzbekistan"),
    Country::new("VA", "Holy See (Vatican City State)"),
    Country::new("VC", "Saint Vincent and the Grenadines"),
    Country::new("VE", "Venezuela, Bolivarian Republic of")
        .official("Bolivarian Republic of Venezuela")
        .common("Venezuela"),
    Country::new("VG", "Virgin Islands, British").official("British Virgin Islands"),
    Country::new("VI", "Virgin Islands, U.S.").official("Virgin Islands of the United States"),
    Country::new("VN", "Viet Nam")
        .official("Socialist Republic of Viet Nam")
        .common("Vietnam"),
    Country::new("VU", "Vanuatu").official("Republic of Vanuatu"),
    Country::new("WF", "Wallis and Futuna"),
    Country::new("WS", "Samoa").official("Independent State of Samoa"),
    Country::new("YE", "Yemen").official("Republic of Yemen"),
    Country::new("YT", "Mayotte"),
    Country::new("ZA", "South Africa").official("Republic of South Africa"),
    Country::new("ZM", "Zambia").official("Republic of Zambia"),
    Country::new("ZW", "Zimbabwe").official("Republic of Zimbabwe"),
];
