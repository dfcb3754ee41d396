/*!

This is the long-form manual for `dhondt` and the `dhondt` command line program.

## The allocation

Every party receives the quotients `votes / 1`, `votes / 2`, ..., `votes / seats`.
All the quotients are ranked from the largest to the smallest and each of the first
`seats` quotients awards one seat to its party.

Quotients are compared exactly (as fractions), so `10 / 2` and `5 / 1` are equal.
Equal quotients are ordered by:
1. the tie-break key: the party identifier (`candidateId`), or a SHA-256 digest of
   the seed and the identifier (`random`),
2. the party identifier,
3. the divisor.

The results only list the parties with at least one seat (unless `listing` is set to
`allCandidates`), from the largest number of seats to the smallest, then by name.

## Input formats

The following formats are supported for vote files:
* `csv` Comma Separated Values
* `xlsx` Excel spreadsheets
* `json` the election description itself holds the candidates and their votes

### csv

One party per line:

```text
id,name,votes
a,Alpha,100
b,Beta,50
```

The header row is optional, see `firstVoteRowIndex` below.

### xlsx

Same layout as the CSV format, in the first worksheet (or the worksheet given with
`--excel-worksheet-name` / `excelWorksheetName`).

## Configuration

An election is described by a JSON file:

```text
{
  "outputSettings": { "contestName": "City council" },
  "seats": 4,
  "candidates": [ { "id": "a", "name": "Alpha", "votes": 100 } ],
  "voteFileSources": [ { "provider": "csv", "filePath": "votes.csv" } ],
  "rules": { "tiebreakMode": "candidateId", "duplicateCandidate": "reject" }
}
```

Options for `voteFileSources` (paths are relative to the configuration file):
 - `provider` (string): `csv` or `xlsx`
 - `filePath` (string)
 - `idColumnIndex`, `nameColumnIndex`, `votesColumnIndex` (number, numeric string or
   Excel letter, optional): 1-based column positions. Defaults: 1, 2, 3.
 - `firstVoteRowIndex` (number or string, optional): the first row holding a party.
   Default: 2 (the first row is a header).
 - `excelWorksheetName` (string, optional)

Options for `rules` (all optional):
 - `tiebreakMode`: `candidateId` (default) or `random`. `random` requires `randomSeed`.
 - `randomSeed`: a number, as a string.
 - `duplicateCandidate`: `reject` (default) or `aggregate` (votes of parties sharing
   an identifier are summed).
 - `listing`: `winnersOnly` (default) or `allCandidates`.

 */
