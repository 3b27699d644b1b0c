//! Shared fixtures for unit tests: a seeded temporary statistics database.

use std::path::Path;

use rusqlite::Connection;
use tempfile::TempDir;

use crate::repository::ReportRepository;

/// Create the statistics schema and a small deterministic dataset.
///
/// Fixture facts the tests rely on:
/// - doses sum to exactly 2.5 billion,
/// - Measles 2021 global rate is 35.0 per 100k (70,000 cases / 200M people),
///   with Chad (60.0) and Bangladesh (37.5) above it and Australia (4.0) below,
/// - Cholera 2019 has cases but no population rows, so its global rate is
///   undefined.
pub fn seed_database(path: &Path) {
    let conn = Connection::open(path).expect("open fixture database");
    conn.execute_batch(
        r#"
        CREATE TABLE Region (
            RegionID INTEGER PRIMARY KEY,
            RegionName TEXT NOT NULL
        );
        CREATE TABLE Economy (
            EconomyID INTEGER PRIMARY KEY,
            Phase TEXT NOT NULL
        );
        CREATE TABLE Country (
            CountryID INTEGER PRIMARY KEY,
            CountryName TEXT NOT NULL,
            RegionID INTEGER NOT NULL REFERENCES Region(RegionID),
            EconomyID INTEGER NOT NULL REFERENCES Economy(EconomyID)
        );
        CREATE TABLE Antigen (
            AntigenID INTEGER PRIMARY KEY,
            AntigenName TEXT NOT NULL
        );
        CREATE TABLE Vaccination (
            CountryID INTEGER NOT NULL REFERENCES Country(CountryID),
            AntigenID INTEGER NOT NULL REFERENCES Antigen(AntigenID),
            Year INTEGER NOT NULL,
            TargetNum INTEGER,
            Doses INTEGER,
            Coverage REAL,
            PRIMARY KEY (CountryID, AntigenID, Year)
        );
        CREATE TABLE Infection_Type (
            InfectionTypeID INTEGER PRIMARY KEY,
            Description TEXT NOT NULL
        );
        CREATE TABLE InfectionData (
            CountryID INTEGER NOT NULL REFERENCES Country(CountryID),
            InfectionTypeID INTEGER NOT NULL REFERENCES Infection_Type(InfectionTypeID),
            Year INTEGER NOT NULL,
            Cases INTEGER,
            PRIMARY KEY (CountryID, InfectionTypeID, Year)
        );
        CREATE TABLE CountryPopulation (
            CountryID INTEGER NOT NULL REFERENCES Country(CountryID),
            Year INTEGER NOT NULL,
            Population INTEGER,
            PRIMARY KEY (CountryID, Year)
        );
        CREATE TABLE Persona (
            PersonaID INTEGER PRIMARY KEY AUTOINCREMENT,
            Name TEXT NOT NULL,
            Occupation TEXT,
            ImagePath TEXT
        );
        CREATE TABLE Team (
            StudentID TEXT PRIMARY KEY,
            FirstName TEXT NOT NULL,
            LastName TEXT NOT NULL
        );

        INSERT INTO Region VALUES (1, 'Oceania'), (2, 'Asia'), (3, 'Africa');
        INSERT INTO Economy VALUES
            (1, 'High Income'),
            (2, 'Lower Middle Income'),
            (3, 'Low Income'),
            (4, 'Upper Middle Income');
        INSERT INTO Country VALUES
            (1, 'Australia', 1, 1),
            (2, 'Bangladesh', 2, 2),
            (3, 'Chad', 3, 3);
        INSERT INTO Antigen VALUES (1, 'MCV1'), (2, 'DTP3');

        INSERT INTO Vaccination VALUES
            (1, 1, 2021, 5000000, 1200000000, 95.0),
            (1, 2, 2020, NULL, NULL, NULL),
            (2, 1, 2021, 30000000, 1300000000, 42.5);

        INSERT INTO Infection_Type VALUES (1, 'Measles'), (2, 'Cholera');

        INSERT INTO InfectionData VALUES
            (1, 1, 2021, 1000),
            (2, 1, 2021, 60000),
            (3, 1, 2021, 9000),
            (3, 2, 2019, 500);

        INSERT INTO CountryPopulation VALUES
            (1, 2021, 25000000),
            (2, 2021, 160000000),
            (3, 2021, 15000000);

        INSERT INTO Persona (Name, Occupation, ImagePath) VALUES
            ('Dr. Amina Rahman', 'Doctor', 'images/persona1.jpg'),
            ('Arif Hossain', 'Analyst', 'images/persona2.jpg');
        INSERT INTO Team VALUES
            ('S4204234', 'Prantik', 'Saha'),
            ('S4209971', 'Tasnim', 'Hasan');
        "#,
    )
    .expect("seed fixture database");
}

/// A repository over a freshly seeded temporary database. The directory must
/// be kept alive for the duration of the test.
pub fn seeded_repository() -> (ReportRepository, TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db_path = dir.path().join("immunisation.db");
    seed_database(&db_path);
    (ReportRepository::new(db_path), dir)
}
