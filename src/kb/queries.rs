/// Every artwork carrying a museum object id, with what rendering needs
/// from its creators and depicted persons
pub const PAINTINGS_QUERY: &str = r#"# Nationalmuseum import
SELECT ?item ?obj_id
  (group_concat(distinct ?type;separator="|") as ?types)
  (group_concat(distinct ?creator;separator="|") as ?creators)
  (group_concat(distinct ?creator_template;separator="|") as ?creator_templates)
  (group_concat(distinct ?creator_cat;separator="|") as ?creator_cats)
  (group_concat(distinct ?death_date;separator="|") as ?death_dates)
  (group_concat(distinct ?depicted_person;separator="|") as ?depicted_persons)
  (group_concat(distinct ?depicted_cat;separator="|") as ?depicted_cats)
  (group_concat(distinct ?commons_cat;separator="|") as ?commons_cats)
WHERE
{
  ?item wdt:P2539 ?obj_id .
  OPTIONAL { ?item wdt:P31 ?type . }
  OPTIONAL {
    ?item wdt:P170 ?creator .
    FILTER(?creator != wd:Q4233718)
    OPTIONAL { ?creator wdt:P1472 ?creator_template . }
    OPTIONAL { ?creator wdt:P373 ?creator_cat . }
    OPTIONAL { ?creator wdt:P570 ?death_date . }
  }
  OPTIONAL {
    ?item wdt:P180 ?depicted_person .
    ?depicted_person wdt:P31 wd:Q5 .
    OPTIONAL { ?depicted_person wdt:P373 ?depicted_cat . }
  }
  OPTIONAL { ?item wdt:P373 ?commons_cat . }
}
group by ?item ?obj_id
"#;

/// Every person carrying a museum artist id
pub const CREATORS_QUERY: &str = r#"# Nationalmuseum import
SELECT ?item ?itemLabel ?nsid
  (group_concat(distinct ?creator_template;separator="|") as ?creator_templates)
  (group_concat(distinct ?commons_cat;separator="|") as ?commons_cats)
  (group_concat(distinct ?death_date;separator="|") as ?death_dates)
WHERE
{
  ?item wdt:P2538 ?nsid .
  OPTIONAL { ?item wdt:P1472 ?creator_template . }
  OPTIONAL { ?item wdt:P373 ?commons_cat . }
  OPTIONAL { ?item wdt:P570 ?death_date . }
  SERVICE wikibase:label { bd:serviceParam wikibase:language "sv" }
}
group by ?item ?itemLabel ?nsid
"#;
