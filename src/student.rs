//! Built-in schema and domains for the UCI student-performance dataset.
//!
//! Column names are the camel-cased names the Sankey view selects by (`famSize`, `motherEdu`,
//! `weekdayAlc`, ...). The raw UCI headers (`famsize`, `Medu`, `Dalc`, ...) are registered as
//! field aliases, so the raw UCI `student-mat.csv` / `student-por.csv` files load directly with
//! `csv_delimiter: b';'`.

use crate::domain::DomainRegistry;
use crate::error::GraphResult;
use crate::types::{DataType, Field, Schema};

const SCHOOL: &[(&str, &str)] = &[("GP", "Gabriel Pereira"), ("MS", "Mousinho Da Silveira")];
const SEX: &[(&str, &str)] = &[("M", "Male"), ("F", "Female")];
const ADDRESS: &[(&str, &str)] = &[("U", "Urban"), ("R", "Rural")];
const FAM_SIZE: &[(&str, &str)] = &[("LE3", "<=3"), ("GT3", ">3")];
const PARENT_STATUS: &[(&str, &str)] = &[("T", "Together"), ("A", "Apart")];
const EDUCATION: &[(&str, &str)] = &[
    ("0", "None"),
    ("1", "Fourth Grade"),
    ("2", "Ninth Grade"),
    ("3", "Secondary Ed"),
    ("4", "Higher Ed"),
];
const JOB: &[(&str, &str)] = &[
    ("teacher", "Teacher"),
    ("health", "Health Care"),
    ("services", "Civil Services"),
    ("at_home", "Stay At Home"),
    ("other", "Other"),
];
const REASON: &[(&str, &str)] = &[
    ("home", "Close To Home"),
    ("reputation", "Reputation"),
    ("course", "CoursePreference"),
    ("other", "Other"),
];
const GUARDIAN: &[(&str, &str)] = &[("mother", "Mother"), ("father", "Father"), ("other", "Other")];
const TRAVEL_TIME: &[(&str, &str)] = &[
    ("1", "< 15 min"),
    ("2", "15-30 min"),
    ("3", "30 min - 1 h"),
    ("4", "> 1 h"),
];
const STUDY_TIME: &[(&str, &str)] = &[
    ("1", "< 2 h"),
    ("2", "2-5 h"),
    ("3", "5-10 h"),
    ("4", "> 10 h"),
];
const FAILURES: &[(&str, &str)] = &[("0", "never"), ("1", "once"), ("2", "twice"), ("3", "thrice+")];
const QUALITY: &[(&str, &str)] = &[
    ("1", "Very Bad"),
    ("2", "Bad"),
    ("3", "Average"),
    ("4", "Good"),
    ("5", "Very Good"),
];
const FREQUENCY: &[(&str, &str)] = &[
    ("1", "Very Low"),
    ("2", "Low"),
    ("3", "Average"),
    ("4", "High"),
    ("5", "Very High"),
];
const YES_NO: &[(&str, &str)] = &[("yes", "Yes"), ("no", "No")];

/// Categorical columns in registration order, with their domains.
const CATEGORICAL: &[(&str, &[(&str, &str)])] = &[
    ("school", SCHOOL),
    ("sex", SEX),
    ("address", ADDRESS),
    ("famSize", FAM_SIZE),
    ("parentStatus", PARENT_STATUS),
    ("motherEdu", EDUCATION),
    ("fatherEdu", EDUCATION),
    ("motherJob", JOB),
    ("fatherJob", JOB),
    ("reason", REASON),
    ("guardian", GUARDIAN),
    ("travelTime", TRAVEL_TIME),
    ("studyTime", STUDY_TIME),
    ("failures", FAILURES),
    ("schoolSup", YES_NO),
    ("famSup", YES_NO),
    ("paid", YES_NO),
    ("activities", YES_NO),
    ("nursery", YES_NO),
    ("higher", YES_NO),
    ("internet", YES_NO),
    ("romantic", YES_NO),
    ("famRel", QUALITY),
    ("freeTime", FREQUENCY),
    ("goOut", FREQUENCY),
    ("weekdayAlc", FREQUENCY),
    ("weekendAlc", FREQUENCY),
    ("health", QUALITY),
];

/// `(column, raw UCI header)` for columns whose names differ from the raw file.
const RAW_HEADERS: &[(&str, &str)] = &[
    ("famSize", "famsize"),
    ("parentStatus", "Pstatus"),
    ("motherEdu", "Medu"),
    ("fatherEdu", "Fedu"),
    ("motherJob", "Mjob"),
    ("fatherJob", "Fjob"),
    ("travelTime", "traveltime"),
    ("studyTime", "studytime"),
    ("schoolSup", "schoolsup"),
    ("famSup", "famsup"),
    ("famRel", "famrel"),
    ("freeTime", "freetime"),
    ("goOut", "goout"),
    ("weekdayAlc", "Dalc"),
    ("weekendAlc", "Walc"),
];

/// The registry of all 28 categorical student columns.
pub fn registry() -> GraphResult<DomainRegistry> {
    CATEGORICAL
        .iter()
        .try_fold(DomainRegistry::new(), |reg, (column, pairs)| {
            reg.with_domain(column, pairs.iter().copied())
        })
}

/// Full 33-column schema of one student row.
///
/// Every categorical column is read as a string, so `"2"` matches the study-time domain and a
/// stray `"maybe"` in a yes/no column loads and is later excluded instead of failing the load.
/// `age`, `absences` and `G1`..`G3` are integers.
pub fn schema() -> Schema {
    let mut fields = Vec::with_capacity(33);
    for (column, _) in CATEGORICAL {
        fields.push(aliased(Field::new(*column, DataType::Utf8)));
        if *column == "sex" {
            fields.push(Field::new("age", DataType::Int64));
        }
    }
    fields.push(Field::new("absences", DataType::Int64));
    for grade in ["G1", "G2", "G3"] {
        fields.push(Field::new(grade, DataType::Int64));
    }
    Schema::new(fields)
}

fn aliased(field: Field) -> Field {
    match RAW_HEADERS.iter().find(|(column, _)| *column == field.name) {
        Some((_, raw)) => field.with_alias(*raw),
        None => field,
    }
}
